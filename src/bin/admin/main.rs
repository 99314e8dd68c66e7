//! Command-line admin for the user-admin API.
//!
//! ```bash
//! admin register --name A --email a@x.com --password p1 --dob 2000-01-01
//! admin list
//! admin edit <id> --status Suspended
//! admin delete <id>
//! admin logout
//! ```

mod client;
mod session;
mod table;
#[cfg(test)]
mod test_api;

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use client::{ApiClient, ClientError, UserForm};
use session::{Session, SessionError, SessionStore};
use table::render_table;
use thiserror::Error;

#[derive(Debug, Error)]
enum AdminError {
  #[error(transparent)]
  Client(#[from] ClientError),
  #[error(transparent)]
  Session(#[from] SessionError),
}

#[derive(Parser)]
#[command(name = "admin", version, about = "Manage users of the user-admin API")]
struct Cli {
  /// Base URL of the API, including the `/api` prefix.
  #[arg(
    long,
    env = "ADMIN_API_URL",
    default_value = "http://127.0.0.1:5000/api"
  )]
  api_url: String,

  /// Where the local "logged in" marker is kept.
  #[arg(long, env = "ADMIN_SESSION_FILE", default_value = ".admin-session.json")]
  session_file: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Register a user and log in as them
  Register(NewUserArgs),
  /// Log in with existing credentials
  Login {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
  },
  /// Print the user table
  List,
  /// Add a user without changing the current session
  Create(NewUserArgs),
  /// Change the supplied fields of a user
  Edit {
    id: String,
    #[command(flatten)]
    fields: EditArgs,
  },
  /// Delete a user
  Delete { id: String },
  /// Forget the local session. The token stays valid on the server.
  Logout,
  /// Show the local session
  Whoami,
}

#[derive(Args)]
struct NewUserArgs {
  #[arg(long)]
  name: String,
  #[arg(long)]
  email: String,
  #[arg(long)]
  password: String,
  /// Date of birth, YYYY-MM-DD
  #[arg(long)]
  dob: Option<String>,
  #[arg(long)]
  role: Option<String>,
  /// Active, Suspended or Inactive
  #[arg(long)]
  status: Option<String>,
}

impl From<NewUserArgs> for UserForm {
  fn from(args: NewUserArgs) -> Self {
    Self {
      name: Some(args.name),
      dob: args.dob,
      email: Some(args.email),
      password: Some(args.password),
      role: args.role,
      status: args.status,
    }
  }
}

#[derive(Args)]
struct EditArgs {
  #[arg(long)]
  name: Option<String>,
  #[arg(long)]
  email: Option<String>,
  #[arg(long)]
  password: Option<String>,
  #[arg(long)]
  dob: Option<String>,
  #[arg(long)]
  role: Option<String>,
  #[arg(long)]
  status: Option<String>,
}

impl From<EditArgs> for UserForm {
  fn from(args: EditArgs) -> Self {
    Self {
      name: args.name,
      dob: args.dob,
      email: args.email,
      password: args.password,
      role: args.role,
      status: args.status,
    }
  }
}

#[actix_web::main]
async fn main() -> ExitCode {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("warn"),
  )
  .init();

  match run(Cli::parse()).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(error) => {
      eprintln!("{}", error);
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> Result<(), AdminError> {
  let client = ApiClient::new(&cli.api_url);
  let sessions = SessionStore::new(&cli.session_file);

  match cli.command {
    Command::Register(args) => {
      let response = client.register(&UserForm::from(args)).await?;
      let session = Session::from(response);
      sessions.save(&session)?;
      println!("Logged in as {}", session.user.email);
      print!("{}", render_table(&client.list().await?));
    }
    Command::Login { email, password } => {
      let session = Session::from(client.login(&email, &password).await?);
      sessions.save(&session)?;
      println!("Logged in as {}", session.user.email);
    }
    Command::List => {
      print!("{}", render_table(&client.list().await?));
    }
    Command::Create(args) => {
      let response = client.register(&UserForm::from(args)).await?;
      println!("User added successfully! ({})", response.user.id);
    }
    Command::Edit { id, fields } => {
      let user = client.update(&id, &UserForm::from(fields)).await?;
      println!("User updated successfully!");
      print!("{}", render_table(&[user]));
    }
    Command::Delete { id } => {
      println!("{}", client.delete(&id).await?);
    }
    Command::Logout => {
      if sessions.clear()? {
        println!("Logged out");
      } else {
        println!("Not logged in");
      }
    }
    Command::Whoami => match sessions.load()? {
      Some(session) => println!(
        "{} <{}> ({})",
        session.user.name, session.user.email, session.user.id
      ),
      None => println!("Not logged in"),
    },
  }
  Ok(())
}
