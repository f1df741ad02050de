use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

pub fn read_secret() -> Result<Zeroizing<String>> {
    //  Environment Variable
    //  PWSCRYPT_SECRET="supersecret" pwscrypt verify <HASH>
    if let Ok(secret) = std::env::var("PWSCRYPT_SECRET") {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    //  stdin (Pipeline)
    //  printf "%s" "$SECRET" | pwscrypt verify <HASH>
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        let secret = buf.trim_end().to_string();

        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    //  Interactive (TTY)
    if io::stdin().is_terminal() {
        let secret = rpassword::prompt_password("Secret: ")?;
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    bail!("No secret provided")
}

pub fn read_new_secret_with_confirmation() -> Result<Zeroizing<String>> {
    if let Ok(secret) = std::env::var("PWSCRYPT_SECRET") {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    if !io::stdin().is_terminal() {
        let stdin = io::stdin();
        let mut handle = stdin.lock();

        let mut secret = Zeroizing::new(String::new());
        handle.read_line(&mut secret)?;
        trim_newline(&mut secret);

        if secret.is_empty() {
            bail!("secret cannot be empty");
        }

        return Ok(secret);
    }

    let first = rpassword::prompt_password("New secret: ")?;
    let second = rpassword::prompt_password("Confirm secret: ")?;

    if first.is_empty() {
        bail!("secret cannot be empty");
    }

    if first != second {
        bail!("secrets do not match");
    }

    Ok(Zeroizing::new(first))
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
