//! Authentication management for the calendar backend.

use clap::Subcommand;
use duesync_core::auth::GoogleAuth;
use duesync_core::error::Result;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Google Calendar: login / logout / status
    Google {
        #[command(subcommand)]
        action: AuthOp,
    },
}

#[derive(Subcommand)]
pub enum AuthOp {
    /// Authenticate via the browser OAuth flow
    Login {
        /// OAuth client ID (stored in the keyring; reused if omitted)
        #[arg(long)]
        client_id: Option<String>,
        /// OAuth client secret (stored in the keyring; reused if omitted)
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Remove stored credentials
    Logout,
    /// Check authentication status
    Status,
}

pub fn run(action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Google { action } => handle_google(action),
    }
}

fn handle_google(op: AuthOp) -> Result<()> {
    match op {
        AuthOp::Login {
            client_id,
            client_secret,
        } => {
            if let (Some(cid), Some(csec)) = (&client_id, &client_secret) {
                GoogleAuth::set_credentials(cid, csec)?;
            }
            let auth = GoogleAuth::from_keyring();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(auth.authenticate())?;
            println!("Google Calendar authenticated");
        }
        AuthOp::Logout => {
            GoogleAuth::from_keyring().disconnect()?;
            println!("Google Calendar disconnected");
        }
        AuthOp::Status => {
            let auth = GoogleAuth::from_keyring();
            println!(
                "{}",
                if auth.is_authenticated() {
                    "authenticated"
                } else {
                    "not authenticated"
                }
            );
        }
    }
    Ok(())
}
