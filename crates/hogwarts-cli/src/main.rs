use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use hogwarts_cli::seeder::{self, SeedConfig};
use hogwarts_config::{AvatarConfig, DatabaseConfig};
use hogwarts_db::PgPool;

#[derive(Parser)]
#[command(name = "hogwarts-cli")]
#[command(about = "Hogwarts CLI - Administrative tools for the Hogwarts API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake faculties and students
    Seed {
        /// Number of faculties to create
        #[arg(short = 'f', long, default_value = "4")]
        faculties: usize,

        /// Number of students to enroll across the new faculties
        #[arg(short = 's', long, default_value = "100")]
        students: usize,
    },
    /// Seed only faculties
    SeedFaculties {
        /// Number of faculties to create
        #[arg(short = 'f', long, default_value = "4")]
        faculties: usize,
    },
    /// Seed students into existing faculties
    SeedStudents {
        /// Number of students to enroll
        #[arg(short = 's', long, default_value = "100")]
        students: usize,
    },
    /// Delete every faculty, student, and avatar
    ClearSeed {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Seed {
            faculties,
            students,
        } => seeder::seed_all(&pool, SeedConfig::new(faculties, students)).await,
        Commands::SeedFaculties { faculties } => handle_seed_faculties(&pool, faculties).await,
        Commands::SeedStudents { students } => handle_seed_students(&pool, students).await,
        Commands::ClearSeed { yes } => handle_clear_seed(&pool, yes).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env().ok_or("DATABASE_URL must be set")?;
    let pool = hogwarts_db::init_db_pool(&config).await?;
    hogwarts_db::run_migrations(&pool).await?;
    Ok(pool)
}

async fn handle_seed_faculties(
    pool: &PgPool,
    faculties: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids = seeder::seed_faculties_only(pool, faculties).await?;
    println!("✅ Created {} faculties", ids.len());
    Ok(())
}

async fn handle_seed_students(
    pool: &PgPool,
    students: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids = seeder::seed_students_only(pool, students).await?;
    println!("✅ Created {} students", ids.len());
    Ok(())
}

async fn handle_clear_seed(pool: &PgPool, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete all faculties, students, and avatars?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Aborted");
        return Ok(());
    }

    let avatars = AvatarConfig::from_env();
    seeder::clear_all(pool, &avatars.dir).await
}
