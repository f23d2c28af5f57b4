//! gyandarshak CLI: student-side access to the counselling platform.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gyandarshak",
    version,
    about = "Student counselling platform client"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init,

    /// Create a student account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: String,
    },

    /// Log in and print an access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Browse colleges
    Colleges {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Matches colleges offering a course in this stream
        #[arg(long)]
        stream: Option<String>,
    },

    /// Browse entrance exams and their dates
    Exams {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        stream: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },

    /// Browse scholarships
    Scholarships {
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        state: Option<String>,
        /// e.g. "government", "trust"
        #[arg(long)]
        provider_type: Option<String>,
    },

    /// Request or list counselling sessions
    Sessions {
        #[command(subcommand)]
        command: SessionsCommand,
    },

    /// Ask the counselling assistant a question
    Ask {
        question: String,
    },

    /// Online tests
    Tests {
        #[command(subcommand)]
        command: TestsCommand,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show your profile
    Show,
    /// Update profile fields; omitted fields are left unchanged
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        class_level: Option<String>,
        #[arg(long)]
        stream_interest: Option<String>,
        #[arg(long)]
        target_field: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionsCommand {
    /// Ask for a counselling session
    Request {
        /// Preferred date (YYYY-MM-DD)
        #[arg(long)]
        date: chrono::NaiveDate,
        /// Preferred time, e.g. "17:30"
        #[arg(long)]
        time: Option<String>,
        /// "online" or "offline"
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// List your session requests
    List,
}

#[derive(Subcommand)]
enum TestsCommand {
    /// List available tests
    List,
    /// Show your past attempts
    History,
    /// Take a test interactively (answers are read from stdin)
    Take {
        test_id: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gyandarshak=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Register {
            name,
            email,
            phone,
            password,
        } => commands::account::register(config, name, email, phone, password).await,
        Commands::Login { email, password } => {
            commands::account::login(config, email, password).await
        }
        Commands::Profile { command } => match command {
            ProfileCommand::Show => commands::account::show_profile(config).await,
            ProfileCommand::Update {
                full_name,
                state,
                district,
                class_level,
                stream_interest,
                target_field,
            } => {
                let update = gyandarshak_core::model::ProfileUpdate {
                    full_name,
                    state,
                    district,
                    class_level,
                    stream_interest,
                    target_field,
                };
                commands::account::update_profile(config, update).await
            }
        },
        Commands::Colleges {
            state,
            city,
            stream,
        } => {
            let filter = gyandarshak_core::model::CollegeFilter {
                state,
                city,
                stream,
            };
            commands::catalog::colleges(config, filter).await
        }
        Commands::Exams {
            year,
            stream,
            level,
        } => {
            let filter = gyandarshak_core::model::ExamFilter {
                year,
                stream,
                level,
            };
            commands::catalog::exams(config, filter).await
        }
        Commands::Scholarships {
            level,
            state,
            provider_type,
        } => {
            let filter = gyandarshak_core::model::ScholarshipFilter {
                level,
                state,
                provider_type,
            };
            commands::catalog::scholarships(config, filter).await
        }
        Commands::Sessions { command } => match command {
            SessionsCommand::Request {
                date,
                time,
                mode,
                note,
            } => {
                let draft = gyandarshak_core::model::SessionRequestDraft {
                    preferred_date: date,
                    preferred_time: time,
                    mode,
                    note,
                };
                commands::sessions::request(config, draft).await
            }
            SessionsCommand::List => commands::sessions::list(config).await,
        },
        Commands::Ask { question } => commands::ask::execute(config, question).await,
        Commands::Tests { command } => match command {
            TestsCommand::List => commands::tests::list(config).await,
            TestsCommand::History => commands::tests::history(config).await,
            TestsCommand::Take { test_id } => commands::tests::take(config, test_id).await,
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
