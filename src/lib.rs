pub mod api;
pub mod config;
pub mod consts;
pub mod corpus;
pub mod error;
pub mod key;
pub mod optimizer;
pub mod oracle;
pub mod scorer;
// cmd and reports are binary modules (see main.rs).
