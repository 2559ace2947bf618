use super::TextSource;
use crate::reports;
use cipherforge::error::CfResult;
use cipherforge::key::PermutationKey;
use cipherforge::optimizer::initialization::random_key;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    /// Encryption key (plain -> cipher). Random when omitted.
    #[arg(short, long)]
    pub key: Option<String>,

    #[command(flatten)]
    pub source: TextSource,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: EncryptArgs) -> CfResult<()> {
    let key: PermutationKey = match &args.key {
        Some(k) => k.parse()?,
        None => {
            let mut rng = if let Some(s) = args.seed {
                fastrand::Rng::with_seed(s)
            } else {
                fastrand::Rng::new()
            };
            random_key(&mut rng)
        }
    };

    let plain_text = args.source.read()?;
    let cipher_text = key.apply(&plain_text);
    let decryption = key.inverse();

    println!("Encryption key: {}", key);
    println!("Decryption key: {}", decryption);
    println!("Ciphertext: {}", cipher_text);
    reports::print_key_table("ENCRYPTION KEY", &key);
    Ok(())
}
