//! CLI interface for the booking client
//!
//! Defines the subcommand tree and turns each command into a call on
//! `BookingClient`, returning the text to print.

use crate::client::BookingClient;
use crate::error::Result;
use crate::models::{Order, Passenger, ProfileUpdate, SeatClass, Train, TrainItem, UserProfile};
use crate::services::{SortBy, TicketQuery, TicketResult};
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with a phone number or name
    Login {
        account: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Edit the logged-in user's profile
    Profile(ProfileArgs),
    /// Mark the logged-in user as identity-verified
    Verify,
    #[command(subcommand)]
    Passenger(PassengerCommand),
    #[command(subcommand)]
    Trains(TrainCommand),
    /// Search trains by station
    Search {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Travel date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// time | duration | price
        #[arg(long)]
        sort: Option<SortBy>,
    },
    #[command(subcommand)]
    Order(OrderCommand),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub identity: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PassengerCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        identity: String,
    },
    List,
    Remove { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TrainCommand {
    List,
    Show { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    /// Book seats for registered passengers
    Book {
        train: String,
        /// Seat class, e.g. 二等座 or second
        #[arg(long)]
        class: SeatClass,
        /// Passenger ids
        #[arg(long = "passenger", required = true)]
        passengers: Vec<String>,
    },
    List,
    Show { id: String },
    Pay { id: String },
    Cancel { id: String },
    Refund { id: String },
    /// Refund a paid order and rebook it on another train
    Reschedule {
        id: String,
        #[arg(long)]
        to: String,
    },
}

/// Run one command against the client and return the text to display
pub fn execute(client: &BookingClient, command: Command) -> Result<String> {
    match command {
        Command::Register {
            name,
            phone,
            password,
        } => {
            let session = client.auth().register(&name, &phone, &password)?;
            Ok(format!("Registered and logged in\n{}", format_profile(&session.user)))
        }
        Command::Login { account, password } => {
            let session = client.auth().login(&account, &password)?;
            Ok(format!("Logged in\n{}", format_profile(&session.user)))
        }
        Command::Logout => {
            client.auth().logout()?;
            Ok("Logged out".to_string())
        }
        Command::Whoami => Ok(match client.auth().current_user()? {
            Some(user) => format_profile(&user),
            None => "Not logged in".to_string(),
        }),
        Command::Profile(args) => {
            let update = ProfileUpdate {
                name: args.name,
                phone_number: args.phone,
                identity_number: args.identity,
            };
            if update.is_empty() {
                return Ok("Nothing to update".to_string());
            }
            let user = client.auth().update_profile(update)?;
            Ok(format_profile(&user))
        }
        Command::Verify => {
            let user = client.auth().verify_identity()?;
            Ok(format_profile(&user))
        }
        Command::Passenger(cmd) => execute_passenger(client, cmd),
        Command::Trains(cmd) => execute_trains(client, cmd),
        Command::Search {
            from,
            to,
            date,
            sort,
        } => {
            let results = client.tickets().search(&TicketQuery {
                from,
                to,
                date,
                sort_by: sort,
            })?;
            if results.is_empty() {
                return Ok("No trains found".to_string());
            }
            Ok(join_lines(results.iter().map(format_ticket)))
        }
        Command::Order(cmd) => execute_order(client, cmd),
    }
}

fn execute_passenger(client: &BookingClient, cmd: PassengerCommand) -> Result<String> {
    match cmd {
        PassengerCommand::Add { name, identity } => {
            let passenger = client.passengers().add(&name, &identity)?;
            Ok(format_passenger(&passenger))
        }
        PassengerCommand::List => {
            let passengers = client.passengers().list()?;
            if passengers.is_empty() {
                return Ok("No passengers".to_string());
            }
            Ok(join_lines(passengers.iter().map(format_passenger)))
        }
        PassengerCommand::Remove { id } => {
            client.passengers().remove(&id)?;
            Ok(format!("Removed {}", id))
        }
    }
}

fn execute_trains(client: &BookingClient, cmd: TrainCommand) -> Result<String> {
    match cmd {
        TrainCommand::List => Ok(join_lines(client.trains().list()?.iter().map(format_train_item))),
        TrainCommand::Show { id } => Ok(match client.trains().get(&id)? {
            Some(train) => format_train_detail(&train),
            None => format!("Train {} not found", id),
        }),
    }
}

fn execute_order(client: &BookingClient, cmd: OrderCommand) -> Result<String> {
    let orders = client.orders();
    let order = match cmd {
        OrderCommand::Book {
            train,
            class,
            passengers,
        } => orders.book(&train, class, passengers)?,
        OrderCommand::List => {
            let all = orders.list()?;
            if all.is_empty() {
                return Ok("No orders".to_string());
            }
            return Ok(join_lines(all.iter().map(format_order)));
        }
        OrderCommand::Show { id } => match orders.get(&id)? {
            Some(order) => order,
            None => return Ok(format!("Order {} not found", id)),
        },
        OrderCommand::Pay { id } => orders.pay(&id)?,
        OrderCommand::Cancel { id } => orders.cancel(&id)?,
        OrderCommand::Refund { id } => orders.refund(&id)?,
        OrderCommand::Reschedule { id, to } => orders.reschedule(&id, &to)?,
    };
    Ok(format_order(&order))
}

fn join_lines<I: Iterator<Item = String>>(lines: I) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

/// Format a user profile for display
pub fn format_profile(user: &UserProfile) -> String {
    format!(
        "{} {} phone={} id_no={} verified={}",
        user.id,
        user.name,
        user.phone_number,
        if user.identity_number.is_empty() { "-" } else { user.identity_number.as_str() },
        user.is_verified
    )
}

pub fn format_passenger(passenger: &Passenger) -> String {
    format!("{} {} {}", passenger.id, passenger.name, passenger.identity_number)
}

pub fn format_train_item(train: &TrainItem) -> String {
    format!(
        "{} {} {} {} -> {} {} ({})",
        train.id,
        train.train_no,
        train.from_station,
        train.departure_time,
        train.to_station,
        train.arrival_time,
        train.duration
    )
}

pub fn format_train_detail(train: &Train) -> String {
    let mut lines = vec![format_train_item(&train.item())];
    for stop in &train.stops {
        lines.push(format!(
            "  {} {} arr {} dep {}",
            stop.code, stop.name, stop.arrival_time, stop.departure_time
        ));
    }
    for seat in &train.seats {
        lines.push(format!("  {} remaining {} ¥{}", seat.class_name, seat.remaining, seat.price));
    }
    lines.join("\n")
}

pub fn format_ticket(result: &TicketResult) -> String {
    format!(
        "{} from ¥{}  {}",
        format_train_item(&result.train),
        result.min_price,
        result.seats_summary
    )
}

/// Format an order for display
pub fn format_order(order: &Order) -> String {
    format!(
        "{} {} {} x{} ¥{} {} {}",
        order.id,
        order.train_no,
        order.seat_class,
        order.passenger_ids.len(),
        order.total_price,
        order.status,
        order.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}
