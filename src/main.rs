use anyhow::Result;
use clap::{Parser, Subcommand};
mod auth;
use pwscrypt::{ScryptHasher, ScryptParams};

#[derive(Debug, clap::Args)]
struct ScryptArgs {
    /// Scrypt CPU/memory cost as log2(N) (default: 14)
    #[arg(long = "log-n", global = true, env = "PWSCRYPT_LOG_N")]
    log_n: Option<u8>,

    /// Scrypt block size r (default: 8)
    #[arg(long = "scrypt-r", global = true, env = "PWSCRYPT_R")]
    r: Option<u32>,

    /// Scrypt parallelism p (default: 1)
    #[arg(long = "scrypt-p", global = true, env = "PWSCRYPT_P")]
    p: Option<u32>,
}

impl ScryptArgs {
    fn to_params(&self) -> Result<ScryptParams> {
        let default = ScryptParams::default();

        ScryptParams::new(
            self.log_n.unwrap_or(default.log_n()),
            self.r.unwrap_or(default.r()),
            self.p.unwrap_or(default.p()),
        )
    }
}

#[derive(Debug, Parser)]
#[command(name = "pwscrypt")]
#[command(
    version,
    about = "Scrypt password hashing with cost-parameter upgrade detection."
)]
struct Cli {
    #[command(flatten)]
    scrypt: ScryptArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a secret and prints the encoded hash
    Hash,

    /// Verifies a secret against a stored hash
    #[command(arg_required_else_help = true)]
    Verify { hash: String },

    /// Checks whether a stored hash needs re-hashing under current parameters
    #[command(arg_required_else_help = true)]
    Check { hash: String },

    /// Shows information about the hasher and current parameters
    Info,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let hasher = ScryptHasher::new(args.scrypt.to_params()?);

    match args.command {
        Commands::Hash => {
            let secret = auth::read_new_secret_with_confirmation()?;
            let stored = hasher.hash(secret.as_bytes())?;
            println!("{stored}");
        }
        Commands::Verify { hash } => {
            let secret = auth::read_secret()?;
            if hasher.verify(secret.as_bytes(), &hash)? {
                println!("ok");
            } else {
                eprintln!("mismatch");
                std::process::exit(1);
            }
        }
        Commands::Check { hash } => {
            if hasher.needs_upgrade(&hash)? {
                println!("rehash needed");
                std::process::exit(2);
            }
            println!("up to date");
        }
        Commands::Info => {
            let params = hasher.params();
            println!("algorithm: {}", hasher.name());
            println!("available: {}", hasher.is_available());
            println!(
                "strength: {} ({})",
                hasher.strength(),
                hasher.human_readable_strength()
            );
            println!(
                "parameters: logN={} r={} p={}",
                params.log_n(),
                params.r(),
                params.p()
            );
            println!("memory per derivation: {} bytes", params.memory_cost_bytes());
            println!("encoded length: {}", hasher.encoded_len());
            if !hasher.is_available() {
                println!("{}", hasher.install_instructions());
            }
        }
    }

    Ok(())
}
