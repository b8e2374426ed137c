use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use vigia::cli::{self, console, seeder};

#[derive(Parser)]
#[command(name = "vigia-cli")]
#[command(about = "Vigia CLI - Administrative tools for Vigia", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Full name of the administrator
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users, reports and notices
    Seed {
        /// Number of students to create
        #[arg(long, default_value = "25")]
        students: usize,

        /// Number of staff members to create
        #[arg(long, default_value = "5")]
        staff: usize,

        /// Number of incident reports to create
        #[arg(long, default_value = "10")]
        reports: usize,

        /// Number of notices to create
        #[arg(long, default_value = "3")]
        notices: usize,
    },
    /// Clear seeded data (keeps administrators and hand-entered data)
    ClearSeed,
    /// Interactive session console
    Console,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::Seed {
            students,
            staff,
            reports,
            notices,
        } => {
            let config = seeder::SeedConfig {
                students,
                staff,
                reports,
                notices,
            };
            if let Err(e) = seeder::seed_all(&pool, config).await {
                eprintln!("\n❌ Error seeding database: {}", e);
                std::process::exit(1);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = seeder::clear_seed(&pool).await {
                eprintln!("\n❌ Error clearing seeded data: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Console => {
            if let Err(e) = console::run(pool).await {
                eprintln!("\n❌ Console error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn handle_create_admin(
    pool: &sqlx::postgres::PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Full name")
            .interact_text()
            .expect("Failed to read name")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    match cli::create_admin(pool, &name, &email, &password).await {
        Ok(_) => {
            println!("\n✅ Administrator created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating administrator: {}", e);
            std::process::exit(1);
        }
    }
}
