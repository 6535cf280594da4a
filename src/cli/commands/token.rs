use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims, Role};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "User id")]
    pub user_id: i64,

    #[arg(long, help = "User email")]
    pub email: String,

    #[arg(long, help = "Profile id (1 admin, 2 governor, 3 SG, 4 coordinator, 5 pole head, 7 pacha, 8 circle head)")]
    pub profile: i32,

    #[arg(long, help = "Pole the account belongs to")]
    pub pole_id: Option<i64>,

    #[arg(long, help = "Circle (pachalik) code the account belongs to")]
    pub code_cercle: Option<String>,
}

pub fn handle(args: TokenArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let role = Role::from_profile_id(args.profile)?;
    // Surface a missing pole/circle now rather than on the first request.
    let scope = role.scope(args.pole_id, args.code_cercle.as_deref())?;

    let claims = Claims::new(
        args.user_id,
        args.email,
        args.profile,
        args.pole_id,
        args.code_cercle,
        config.security.jwt_expiry_hours,
    )?;
    let token = generate_jwt(&claims, &config.security.jwt_secret)?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "token": token,
                "role": role,
                "scope": scope,
                "expires_at": claims.exp,
            })
        ),
    }
    Ok(())
}
