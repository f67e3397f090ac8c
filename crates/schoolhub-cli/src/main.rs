use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use schoolhub_auth::{Role, create_token_with_expiry};
use schoolhub_cli::seeder::{self, SeedConfig};
use schoolhub_config::{DatabaseConfig, JwtConfig};
use schoolhub_db::{MIGRATOR, PgStore, UserStore, init_db_pool};
use schoolhub_models::NewUser;

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user that schools can reference as their admin
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: String,

        /// Email address (unique)
        #[arg(short = 'e', long)]
        email: String,

        /// One of: superadmin, admin, teacher, student
        #[arg(short = 'r', long)]
        role: Role,
    },
    /// Mint a bearer token signed with JWT_SECRET
    IssueToken {
        /// Value of the `userId` claim
        #[arg(short = 'u', long)]
        user_id: String,

        /// One of: superadmin, admin, teacher, student
        #[arg(short = 'r', long)]
        role: Role,

        /// Lifetime in seconds (defaults to JWT_ACCESS_EXPIRY)
        #[arg(long)]
        expiry: Option<i64>,
    },
    /// Seed the database with fake schools, classrooms and students
    Seed {
        /// Number of schools to create
        #[arg(short = 's', long, default_value = "5")]
        schools: usize,

        /// Number of classrooms per school
        #[arg(long, default_value = "4")]
        classrooms_per_school: usize,

        /// Number of students per classroom
        #[arg(long, default_value = "25")]
        students_per_classroom: usize,
    },
}

async fn connect() -> anyhow::Result<PgStore> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;
    Ok(PgStore::new(pool))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            let store = connect().await?;
            MIGRATOR.run(store.pool()).await?;
            println!("✅ Migrations applied");
        }
        Commands::CreateUser { name, email, role } => {
            let store = connect().await?;
            let user = store
                .insert_user(NewUser { name, email, role })
                .await
                .context("Error creating user")?;
            println!("✅ User created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
        }
        Commands::IssueToken {
            user_id,
            role,
            expiry,
        } => {
            let jwt_config = JwtConfig::from_env()?;
            let expiry = expiry.unwrap_or(jwt_config.access_token_expiry);
            let token = create_token_with_expiry(&user_id, role, expiry, &jwt_config)
                .map_err(|e| e.error)?;
            println!("{token}");
        }
        Commands::Seed {
            schools,
            classrooms_per_school,
            students_per_classroom,
        } => {
            let store = connect().await?;
            println!("🌱 Seeding {schools} schools...");
            let summary = seeder::seed(
                &store,
                &SeedConfig {
                    schools,
                    classrooms_per_school,
                    students_per_classroom,
                },
            )
            .await?;
            println!(
                "✅ Seeded {} users, {} schools, {} classrooms, {} students",
                summary.users, summary.schools, summary.classrooms, summary.students
            );
        }
    }

    Ok(())
}
