use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coowner_client::{
    dashboard::Dashboard,
    requests::{
        CreateBookingBody, CreateContractBody, CreateDisputeBody, CreateExpenseBody,
        CreatePaymentBody, CreateVehicleBody, CreateVoteBody,
    },
    view::{Notice, Table},
    ApiClient, ClientError, Config, History, Navigator, View,
};

#[derive(Debug, Parser)]
#[command(name = "coowner", version, about = "Shared-vehicle co-ownership client")]
struct Cli {
    /// Backend origin, e.g. http://localhost:8080.
    #[arg(long, env = "COOWNER_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "COOWNER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Show the dashboard for the signed-in identity.
    Dashboard,
    #[command(subcommand)]
    Groups(GroupCommand),
    #[command(subcommand)]
    Vehicles(VehicleCommand),
    #[command(subcommand)]
    Bookings(BookingCommand),
    #[command(subcommand)]
    Expenses(ExpenseCommand),
    #[command(subcommand)]
    Funds(FundCommand),
    #[command(subcommand)]
    Contracts(ContractCommand),
    #[command(subcommand)]
    Votes(VoteCommand),
    #[command(subcommand)]
    Payments(PaymentCommand),
    #[command(subcommand)]
    Usage(UsageCommand),
    #[command(subcommand)]
    Reports(ReportCommand),
    #[command(subcommand)]
    Disputes(DisputeCommand),
}

#[derive(Debug, Subcommand)]
enum GroupCommand {
    List,
    Show { group_id: i64 },
    Create { name: String },
    Delete { group_id: i64 },
    Members { group_id: i64 },
    AddMember { group_id: i64, user_id: i64, percentage: f64 },
    RemoveMember { group_id: i64, user_id: i64 },
    Transfer { group_id: i64, new_owner_id: i64 },
}

#[derive(Debug, Subcommand)]
enum VehicleCommand {
    List {
        #[arg(long)]
        group: Option<i64>,
    },
    Create {
        vin: String,
        plate: String,
        model: String,
        #[arg(long)]
        group: Option<i64>,
    },
    Delete { vehicle_id: i64 },
}

#[derive(Debug, Subcommand)]
enum BookingCommand {
    List {
        #[arg(long)]
        vehicle: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Times are local, e.g. 2025-03-01T08:00:00.
    Create {
        vehicle_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Cancel { booking_id: i64 },
    Status { booking_id: i64, status: String },
    Priority { group_id: i64 },
}

#[derive(Debug, Subcommand)]
enum ExpenseCommand {
    List { group_id: i64 },
    /// Expense shares owed by the signed-in user.
    Mine,
    Create {
        group_id: i64,
        kind: String,
        amount: f64,
        date: NaiveDate,
        #[arg(long)]
        vehicle: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "EQUAL")]
        split: String,
    },
    Approve { expense_id: i64 },
    Reject { expense_id: i64 },
    Delete { expense_id: i64 },
}

#[derive(Debug, Subcommand)]
enum FundCommand {
    List { group_id: i64 },
    Create {
        group_id: i64,
        fund_type: String,
        #[arg(long)]
        description: Option<String>,
    },
    Transactions { fund_id: i64 },
    Deposit {
        fund_id: i64,
        amount: f64,
        #[arg(long)]
        description: Option<String>,
    },
    Withdraw {
        fund_id: i64,
        amount: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reference: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ContractCommand {
    List { group_id: i64 },
    Create {
        group_id: i64,
        contract_no: String,
        start: NaiveDate,
        end: NaiveDate,
        #[arg(long)]
        terms: Option<String>,
        #[arg(long)]
        document_url: Option<String>,
    },
    Sign { contract_id: i64 },
}

#[derive(Debug, Subcommand)]
enum VoteCommand {
    List { group_id: i64 },
    Create {
        group_id: i64,
        topic: String,
        deadline: NaiveDateTime,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "SIMPLE_MAJORITY")]
        method: String,
    },
    Cast { vote_id: i64, choice: String },
    /// Options and the signed-in user's choice.
    Results { vote_id: i64 },
    Close { vote_id: i64 },
}

#[derive(Debug, Subcommand)]
enum PaymentCommand {
    Mine,
    Create {
        expense_share_id: i64,
        amount: f64,
        #[arg(long, default_value = "BANK_TRANSFER")]
        method: String,
    },
}

#[derive(Debug, Subcommand)]
enum UsageCommand {
    Mine,
    Vehicle { vehicle_id: i64 },
    CheckIn { booking_id: i64, odometer: i64 },
    CheckOut {
        usage_id: i64,
        odometer: i64,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ReportCommand {
    Group { group_id: i64, start: NaiveDate, end: NaiveDate },
    User { user_id: i64, start: NaiveDate, end: NaiveDate },
    UsageVsOwnership { group_id: i64 },
}

#[derive(Debug, Subcommand)]
enum DisputeCommand {
    List {
        #[arg(long)]
        group: Option<i64>,
        #[arg(long)]
        open: bool,
    },
    Create {
        group_id: i64,
        title: String,
        description: String,
        #[arg(long, default_value = "OTHER")]
        category: String,
    },
    Resolve { dispute_id: i64, resolution: String },
}

impl Command {
    /// View the command renders; decides whether a session is required.
    fn view(&self) -> View {
        match self {
            Command::Login { .. } | Command::Logout => View::Login,
            Command::Register { .. } => View::Register,
            Command::Whoami => View::Profile,
            Command::Dashboard => View::UserDashboard,
            Command::Groups(_) => View::Groups,
            Command::Vehicles(_) => View::Vehicles,
            Command::Bookings(_) => View::Bookings,
            Command::Expenses(_) => View::Expenses,
            Command::Funds(_) => View::Funds,
            Command::Contracts(_) => View::Contracts,
            Command::Votes(_) => View::Votes,
            Command::Payments(_) => View::Payments,
            Command::Usage(_) => View::UsageHistory,
            Command::Reports(_) => View::Reports,
            Command::Disputes(_) => View::Disputes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Set up environment.
    dotenv().ok();

    // Initialize tracing.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(api_url) = cli.api_url {
        config.base_url = api_url;
    }

    let start = cli.command.view();
    let history = Arc::new(History::starting_at(start));
    let client = ApiClient::open(&config, history.clone())
        .with_context(|| format!("opening session at {}", config.session_file().display()))?;

    if !start.is_public() && !client.session().guard()? {
        eprintln!("{}", Notice::info("Please sign in first: coowner login --email <email>"));
        return Ok(ExitCode::FAILURE);
    }

    match run(&client, cli.command).await {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", Notice::error(describe(&err)));
            if !start.is_public() && history.last_redirect() == Some(View::Login) {
                eprintln!("{}", Notice::info("Session ended, sign in again with coowner login"));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn describe(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } => message.clone(),
        ClientError::Transport(_) => "Cannot reach the server, please try again later".to_string(),
        other => other.to_string(),
    }
}

fn done(message: impl Into<String>) -> String {
    format!("{}\n", Notice::success(message))
}

async fn run(client: &ApiClient, command: Command) -> Result<String, ClientError> {
    let output = match command {
        Command::Login { email, password } => {
            let login = client.auth().login(&email, &password).await?;
            let view = client.session().navigator().current();
            let name = login
                .user
                .as_ref()
                .map(|user| user.display_name().to_string())
                .unwrap_or(email);
            done(format!("Signed in as {name}, continue at {view}"))
        }
        Command::Register {
            full_name,
            email,
            password,
            confirm,
        } => {
            client
                .users()
                .register(&full_name, &email, &password, &confirm)
                .await?;
            done("Registration successful, please sign in")
        }
        Command::Logout => {
            client.auth().logout()?;
            done("Signed out")
        }
        Command::Whoami => {
            let user = client.me().show().await?;
            Table::of(&[user], "Unknown user").to_string()
        }
        Command::Dashboard => Dashboard::load(client).await?.to_string(),
        Command::Groups(command) => groups(client, command).await?,
        Command::Vehicles(command) => vehicles(client, command).await?,
        Command::Bookings(command) => bookings(client, command).await?,
        Command::Expenses(command) => expenses(client, command).await?,
        Command::Funds(command) => funds(client, command).await?,
        Command::Contracts(command) => contracts(client, command).await?,
        Command::Votes(command) => votes(client, command).await?,
        Command::Payments(command) => payments(client, command).await?,
        Command::Usage(command) => usage(client, command).await?,
        Command::Reports(command) => reports(client, command).await?,
        Command::Disputes(command) => disputes(client, command).await?,
    };
    Ok(output)
}

async fn groups(client: &ApiClient, command: GroupCommand) -> Result<String, ClientError> {
    let api = client.groups();
    Ok(match command {
        GroupCommand::List => Table::of(&api.list().await?, "You have not joined any group").to_string(),
        GroupCommand::Show { group_id } => Table::of(&[api.show(group_id).await?], "").to_string(),
        GroupCommand::Create { name } => {
            let group = api.create(&name).await?;
            done(format!("Created group {}", group.id.unwrap_or_default()))
        }
        GroupCommand::Delete { group_id } => {
            api.delete(group_id).await?;
            done("Group deleted")
        }
        GroupCommand::Members { group_id } => {
            Table::of(&api.members(group_id).await?, "No members").to_string()
        }
        GroupCommand::AddMember {
            group_id,
            user_id,
            percentage,
        } => {
            api.add_member(group_id, user_id, percentage).await?;
            done("Member added")
        }
        GroupCommand::RemoveMember { group_id, user_id } => {
            api.remove_member(group_id, user_id).await?;
            done("Member removed")
        }
        GroupCommand::Transfer {
            group_id,
            new_owner_id,
        } => {
            api.transfer_ownership(group_id, new_owner_id).await?;
            done("Ownership transferred")
        }
    })
}

async fn vehicles(client: &ApiClient, command: VehicleCommand) -> Result<String, ClientError> {
    let api = client.vehicles();
    Ok(match command {
        VehicleCommand::List { group } => Table::of(&api.list(group).await?, "No vehicles").to_string(),
        VehicleCommand::Create {
            vin,
            plate,
            model,
            group,
        } => {
            let body = CreateVehicleBody {
                vin,
                plate,
                model,
                group_id: group,
            };
            Table::of(&[api.create(&body).await?], "").to_string()
        }
        VehicleCommand::Delete { vehicle_id } => {
            api.delete(vehicle_id).await?;
            done("Vehicle deleted")
        }
    })
}

async fn bookings(client: &ApiClient, command: BookingCommand) -> Result<String, ClientError> {
    let api = client.bookings();
    Ok(match command {
        BookingCommand::List { vehicle, status } => {
            Table::of(&api.list(vehicle, status.as_deref()).await?, "No bookings yet").to_string()
        }
        BookingCommand::Create {
            vehicle_id,
            start,
            end,
        } => {
            let body = CreateBookingBody::new(vehicle_id, start, end)?;
            Table::of(&[api.create(&body).await?], "").to_string()
        }
        BookingCommand::Cancel { booking_id } => {
            api.cancel(booking_id).await?;
            done("Booking cancelled")
        }
        BookingCommand::Status { booking_id, status } => {
            Table::of(&[api.set_status(booking_id, &status).await?], "").to_string()
        }
        BookingCommand::Priority { group_id } => {
            Table::of_value(&api.priority(group_id).await?, "No priority data").to_string()
        }
    })
}

async fn expenses(client: &ApiClient, command: ExpenseCommand) -> Result<String, ClientError> {
    let api = client.expenses();
    Ok(match command {
        ExpenseCommand::List { group_id } => {
            Table::of(&api.for_group(group_id).await?, "No expenses").to_string()
        }
        ExpenseCommand::Mine => Table::of(&api.my_shares().await?, "Nothing owed").to_string(),
        ExpenseCommand::Create {
            group_id,
            kind,
            amount,
            date,
            vehicle,
            description,
            split,
        } => {
            let body = CreateExpenseBody {
                group_id,
                vehicle_id: vehicle,
                kind,
                amount,
                date,
                description,
                split_method: split,
            };
            Table::of(&[api.create(&body).await?], "").to_string()
        }
        ExpenseCommand::Approve { expense_id } => {
            api.approve(expense_id).await?;
            done("Expense approved")
        }
        ExpenseCommand::Reject { expense_id } => {
            api.reject(expense_id).await?;
            done("Expense rejected")
        }
        ExpenseCommand::Delete { expense_id } => {
            api.delete(expense_id).await?;
            done("Expense deleted")
        }
    })
}

async fn funds(client: &ApiClient, command: FundCommand) -> Result<String, ClientError> {
    let api = client.funds();
    Ok(match command {
        FundCommand::List { group_id } => Table::of(&api.for_group(group_id).await?, "No funds").to_string(),
        FundCommand::Create {
            group_id,
            fund_type,
            description,
        } => {
            let fund = api.create(group_id, &fund_type, description.as_deref()).await?;
            Table::of(&[fund], "").to_string()
        }
        FundCommand::Transactions { fund_id } => {
            Table::of(&api.transactions(fund_id).await?, "No transactions").to_string()
        }
        FundCommand::Deposit {
            fund_id,
            amount,
            description,
        } => {
            api.deposit(fund_id, amount, description.as_deref()).await?;
            done("Deposit recorded")
        }
        FundCommand::Withdraw {
            fund_id,
            amount,
            description,
            reference,
        } => {
            api.withdraw(fund_id, amount, description.as_deref(), reference.as_deref())
                .await?;
            done("Withdrawal recorded")
        }
    })
}

async fn contracts(client: &ApiClient, command: ContractCommand) -> Result<String, ClientError> {
    let api = client.contracts();
    Ok(match command {
        ContractCommand::List { group_id } => {
            Table::of(&api.for_group(group_id).await?, "No contracts").to_string()
        }
        ContractCommand::Create {
            group_id,
            contract_no,
            start,
            end,
            terms,
            document_url,
        } => {
            let body = CreateContractBody {
                group_id,
                contract_no,
                start_date: start,
                end_date: end,
                terms,
                document_url,
            };
            Table::of(&[api.create(&body).await?], "").to_string()
        }
        ContractCommand::Sign { contract_id } => {
            api.sign(contract_id).await?;
            done("Contract signed")
        }
    })
}

async fn votes(client: &ApiClient, command: VoteCommand) -> Result<String, ClientError> {
    let api = client.votes();
    Ok(match command {
        VoteCommand::List { group_id } => Table::of(&api.for_group(group_id).await?, "No votes").to_string(),
        VoteCommand::Create {
            group_id,
            topic,
            deadline,
            description,
            method,
        } => {
            let body = CreateVoteBody {
                group_id,
                topic,
                description,
                voting_method: method,
                deadline,
            };
            Table::of(&[api.create(&body).await?], "").to_string()
        }
        VoteCommand::Cast { vote_id, choice } => {
            api.cast(vote_id, &choice).await?;
            done("Vote cast")
        }
        VoteCommand::Results { vote_id } => {
            let (options, mine) = tokio::join!(api.options(vote_id), api.my_vote(vote_id));
            let mut output = Table::of(&options?, "No options").to_string();
            let line = match mine?.and_then(|vote| vote.choice) {
                Some(choice) => Notice::info(format!("You voted {choice}")),
                None => Notice::info("You have not voted yet"),
            };
            output.push_str(&format!("{line}\n"));
            output
        }
        VoteCommand::Close { vote_id } => {
            api.close(vote_id).await?;
            done("Vote closed")
        }
    })
}

async fn payments(client: &ApiClient, command: PaymentCommand) -> Result<String, ClientError> {
    let api = client.payments();
    Ok(match command {
        PaymentCommand::Mine => Table::of(&api.mine().await?, "No payments").to_string(),
        PaymentCommand::Create {
            expense_share_id,
            amount,
            method,
        } => {
            let body = CreatePaymentBody {
                expense_share_id,
                amount,
                method,
            };
            Table::of(&[api.create(&body).await?], "").to_string()
        }
    })
}

async fn usage(client: &ApiClient, command: UsageCommand) -> Result<String, ClientError> {
    let api = client.usage();
    Ok(match command {
        UsageCommand::Mine => Table::of(&api.mine().await?, "No usage history yet").to_string(),
        UsageCommand::Vehicle { vehicle_id } => {
            Table::of(&api.for_vehicle(vehicle_id).await?, "No usage history").to_string()
        }
        UsageCommand::CheckIn {
            booking_id,
            odometer,
        } => Table::of(&[api.check_in(booking_id, odometer).await?], "").to_string(),
        UsageCommand::CheckOut {
            usage_id,
            odometer,
            notes,
        } => Table::of(&[api.check_out(usage_id, odometer, notes.as_deref()).await?], "").to_string(),
    })
}

async fn reports(client: &ApiClient, command: ReportCommand) -> Result<String, ClientError> {
    let api = client.reports();
    let report = match command {
        ReportCommand::Group {
            group_id,
            start,
            end,
        } => api.for_group(group_id, start, end).await?,
        ReportCommand::User {
            user_id,
            start,
            end,
        } => api.for_user(user_id, start, end).await?,
        ReportCommand::UsageVsOwnership { group_id } => api.usage_vs_ownership(group_id).await?,
    };
    Ok(Table::of_value(&report, "No report data").to_string())
}

async fn disputes(client: &ApiClient, command: DisputeCommand) -> Result<String, ClientError> {
    let api = client.disputes();
    Ok(match command {
        DisputeCommand::List { group, open } => {
            let disputes = match (group, open) {
                (Some(group_id), _) => api.for_group(group_id).await?,
                (None, true) => api.open().await?,
                (None, false) => api.list().await?,
            };
            Table::of(&disputes, "No disputes").to_string()
        }
        DisputeCommand::Create {
            group_id,
            title,
            description,
            category,
        } => {
            let body = CreateDisputeBody {
                group_id,
                title,
                description,
                category,
            };
            Table::of(&[api.create(&body).await?], "").to_string()
        }
        DisputeCommand::Resolve {
            dispute_id,
            resolution,
        } => Table::of(&[api.resolve(dispute_id, &resolution).await?], "").to_string(),
    })
}
