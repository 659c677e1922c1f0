use anyhow::Context;
use clap::Parser;
use synclearn::adapters::persistence::db;
use synclearn::config::cli::{Command, UserCommand};
use synclearn::utils::{logger, validation::Validate};
use synclearn::{CliConfig, NewUser, PgUserRepository, SyncLearnError, User, UserService};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_logger(cli.verbose, &config.logging.level, config.logging.format);
    tracing::debug!(config_file = ?cli.config, "starting synclearn");

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(cli.command, config).await {
        let exit_code = match e.downcast_ref::<SyncLearnError>() {
            Some(err) => {
                tracing::error!(severity = ?err.severity(), "{:#}", e);
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
                err.exit_code()
            }
            None => {
                tracing::error!("{:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: Command, config: synclearn::AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Migrate => {
            let pool = db::open_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Command::Check => {
            let pool = db::open_pool(&config.database).await?;
            let schema_present = db::check(&pool).await.context("database check failed")?;
            println!("✅ Database reachable");
            if schema_present {
                println!("✅ users table present");
            } else {
                println!("⚠️  users table missing, run `synclearn migrate`");
            }
        }
        Command::User(user_command) => {
            let pool = db::connect(&config.database).await?;
            let service = UserService::new(PgUserRepository::new(pool));
            run_user_command(&service, user_command).await?;
        }
    }

    Ok(())
}

async fn run_user_command(
    service: &UserService<PgUserRepository>,
    command: UserCommand,
) -> anyhow::Result<()> {
    match command {
        UserCommand::Add(args) => {
            let user = service
                .register(NewUser {
                    email: args.email,
                    nickname: args.nickname,
                    password: args.password,
                    provider: args.provider.into(),
                    role: args.role.into(),
                })
                .await?;
            print_user(&user)?;
        }
        UserCommand::Get(lookup) => {
            let user = match (lookup.email, lookup.id) {
                (Some(email), _) => service.get_by_email(&email).await?,
                (None, Some(id)) => service.get_by_id(id).await?,
                (None, None) => anyhow::bail!("either --email or --id is required"),
            };
            print_user(&user)?;
        }
        UserCommand::List => {
            let users = service.list().await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
            tracing::info!("Listed {} users", users.len());
        }
        UserCommand::Status { id, status } => {
            let user = service.change_status(id, status.into()).await?;
            print_user(&user)?;
        }
        UserCommand::Remove { id } => {
            service.remove(id).await?;
            println!("✅ Removed user {}", id);
        }
    }
    Ok(())
}

fn print_user(user: &User) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(user).context("failed to encode user")?;
    println!("{}", json);
    Ok(())
}
