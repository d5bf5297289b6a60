/**
 * studentleave Command-Line Client
 *
 * Logs in, keeps the token on disk between runs and drives the leave
 * workflow from a terminal.
 */

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use studentleave::client::{
    ApiClient, ClientConfig, ClientError, FileTokenStore, LoginForm, RegisterForm, SessionStatus,
};
use studentleave::shared::types::{ApplyLeaveRequest, LeaveRequestResponse, LeaveStatus, Role};

/// Student leave requests from the command line
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Server base URL (overrides config file and CLIENT_API_URL)
    #[clap(long, global = true)]
    server: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the token
    Login {
        #[clap(long)]
        email: String,
        #[clap(long, env = "STUDENTLEAVE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[clap(long)]
        email: String,
        #[clap(long, env = "STUDENTLEAVE_PASSWORD", hide_env_values = true)]
        password: String,
        #[clap(long, default_value = "")]
        name: String,
        #[clap(long, default_value = "")]
        student_id: String,
        /// Requested role; the server may ignore it
        #[clap(long)]
        role: Option<String>,
    },
    /// Show the logged-in user
    Whoami,
    /// Forget the stored token
    Logout,
    /// Where a page would send the current session (index, login, register, ...)
    Status {
        #[clap(default_value = "index")]
        page: String,
    },
    /// Leave requests
    #[clap(subcommand)]
    Leave(LeaveCommand),
}

#[derive(Subcommand, Debug)]
enum LeaveCommand {
    /// List leave types
    Types,
    /// Apply for leave
    Apply {
        #[clap(long = "type")]
        leave_type: String,
        /// YYYY-MM-DD
        #[clap(long)]
        start: String,
        /// YYYY-MM-DD
        #[clap(long)]
        end: String,
        #[clap(long)]
        reason: String,
        #[clap(long, default_value = "")]
        emergency_contact: String,
    },
    /// List my requests
    List {
        #[clap(long)]
        status: Option<String>,
        #[clap(long)]
        limit: Option<u32>,
    },
    /// Pending requests (teachers and admins)
    Pending,
    /// Show one request
    Show { id: String },
    /// Approve a request
    Approve {
        id: String,
        #[clap(long)]
        note: Option<String>,
    },
    /// Reject a request
    Reject {
        id: String,
        #[clap(long)]
        reason: String,
        #[clap(long)]
        note: Option<String>,
    },
}

fn print_request(request: &LeaveRequestResponse) {
    println!(
        "{}  {:<9} {:<9} {} .. {}  {}",
        request.id,
        request.status.as_str(),
        request.leave_type.as_str(),
        request.start_date.format("%Y-%m-%d"),
        request.end_date.format("%Y-%m-%d"),
        request.reason
    );
    if let Some(applicant) = &request.applicant {
        println!("    applicant: {} <{}> {}", applicant.name, applicant.email, applicant.student_id);
    }
    if !request.rejected_reason.is_empty() {
        println!("    rejected: {}", request.rejected_reason);
    }
    if !request.teacher_note.is_empty() {
        println!("    note: {}", request.teacher_note);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut config = ClientConfig::load()?;
    if let Some(server) = cli.server {
        config.base_url = server;
        config.validate()?;
    }
    let store = FileTokenStore::new(config.token_path.clone());
    let client = ApiClient::new(config, store);

    match cli.command {
        Command::Login { email, password } => {
            let response = client.login(&LoginForm::new(email, password)).await?;
            println!("{} Welcome, {} ({}).", response.message, response.user.display_name(), response.user.role);
        }
        Command::Register {
            email,
            password,
            name,
            student_id,
            role,
        } => {
            let mut form = RegisterForm::new(email, password)
                .with_name(name)
                .with_student_id(student_id);
            if let Some(role) = role {
                form = form.with_role(role.parse::<Role>()?);
            }
            let response = client.register(&form).await?;
            println!("{} You can now log in as {}.", response.message, response.user.email);
        }
        Command::Whoami => match client.current_user().await? {
            Some(user) => println!("{} <{}> role={} student_id={}", user.display_name(), user.email, user.role, user.student_id),
            None => return Err(ClientError::NotLoggedIn),
        },
        Command::Logout => {
            client.logout().await?;
            println!("Logged out.");
        }
        Command::Status { page } => {
            let status = client.auto_login().await?;
            match &status {
                SessionStatus::LoggedIn(user) => println!("logged in as {}", user.email),
                SessionStatus::LoggedOut => println!("logged out"),
            }
            println!("landing: {:?}", status.landing_page(&page));
        }
        Command::Leave(command) => run_leave(&client, command).await?,
    }

    Ok(())
}

async fn run_leave(client: &ApiClient<FileTokenStore>, command: LeaveCommand) -> Result<(), ClientError> {
    match command {
        LeaveCommand::Types => {
            for info in client.leave_types().await? {
                println!("{:<10} {:<16} {}", info.id, info.name, info.description);
            }
        }
        LeaveCommand::Apply {
            leave_type,
            start,
            end,
            reason,
            emergency_contact,
        } => {
            let response = client
                .apply_leave(&ApplyLeaveRequest {
                    leave_type,
                    start_date: start,
                    end_date: end,
                    reason,
                    emergency_contact,
                })
                .await?;
            println!("{}", response.message);
            print_request(&response.leave_request);
        }
        LeaveCommand::List { status, limit } => {
            let status = status.map(|s| s.parse::<LeaveStatus>()).transpose()?;
            let response = client.my_requests(status, limit).await?;
            for request in &response.requests {
                print_request(request);
            }
            println!("{} request(s)", response.total);
        }
        LeaveCommand::Pending => {
            let response = client.pending_requests().await?;
            for request in &response.requests {
                print_request(request);
            }
        }
        LeaveCommand::Show { id } => print_request(&client.request_detail(&id).await?),
        LeaveCommand::Approve { id, note } => {
            let response = client.approve(&id, note.as_deref()).await?;
            println!("{}", response.message);
            print_request(&response.request);
        }
        LeaveCommand::Reject { id, reason, note } => {
            let response = client.reject(&id, &reason, note.as_deref()).await?;
            println!("{}", response.message);
            print_request(&response.request);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
