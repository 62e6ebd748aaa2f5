use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_cell::{AuthService, NavigationDecision, RouteGuard, RouteTarget};
use booking_cell::{BookingFlow, ConfirmationView};
use doctor_cell::ScheduleService;
use shared_config::AppConfig;
use shared_gateway::ApiClient;
use shared_models::RegisterRequest;
use shared_session::{FileTokenStore, SessionStore};

#[derive(Parser)]
#[command(name = "clinic", about = "Book clinic appointments from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a patient account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        birthday: Option<NaiveDate>,
    },
    /// Log in and persist the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session token
    Logout,
    /// Show the logged-in patient's profile
    Profile,
    /// List doctors
    Doctors,
    /// Show a doctor's upcoming slots grouped by date
    Schedule {
        doctor_id: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Reserve a slot with a doctor
    Book { doctor_id: i64, slot_id: i64 },
    /// List your appointments
    Appointments,
    /// Cancel an appointment
    Cancel { appointment_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::from_env();
    info!("Using API at {}", config.api_base_url);

    let session = Arc::new(SessionStore::new(Box::new(FileTokenStore::new(
        config.token_store_path.clone(),
    )))?);
    let gateway = Arc::new(ApiClient::new(&config, session.clone())?);
    let guard = RouteGuard::new(session.clone());

    match cli.command {
        Command::Register {
            username,
            email,
            password,
            phone,
            birthday,
        } => {
            let auth = AuthService::new(gateway, session);
            let profile = auth
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                    phone,
                    birthday,
                })
                .await?;
            println!("Registered {} ({})", profile.username, profile.email);
        }
        Command::Login { email, password } => {
            let auth = AuthService::new(gateway, session);
            let response = auth.login(&email, &password).await?;
            println!("Logged in as {}", response.email);
        }
        Command::Logout => {
            AuthService::new(gateway, session).logout()?;
            println!("Logged out");
        }
        Command::Profile => {
            ensure_authenticated(&guard, "profile")?;
            let profile = gateway.get_profile().await?;
            println!("{} <{}>", profile.username, profile.email);
            if let Some(phone) = profile.phone {
                println!("Phone: {}", phone);
            }
            if let Some(birthday) = profile.birthday {
                println!("Birthday: {}", birthday);
            }
        }
        Command::Doctors => {
            ensure_authenticated(&guard, "doctor-list")?;
            for doctor in gateway.get_doctors().await? {
                println!(
                    "{:>4}  {}  {} ({})",
                    doctor.id,
                    doctor.display_name(),
                    doctor.specialty,
                    doctor.department
                );
            }
        }
        Command::Schedule { doctor_id, date } => {
            ensure_authenticated(&guard, "doctor-detail")?;
            let schedules = ScheduleService::new(gateway.clone());
            let schedule = schedules.load_schedule(doctor_id, date).await?;

            if schedule.is_empty() {
                println!("No upcoming slots.");
            }
            for day in schedule.days() {
                println!("{}", day.date);
                for slot in &day.slots {
                    let marker = if slot.is_available { ' ' } else { 'x' };
                    println!(
                        "  [{}] {:>5}  {} - {}",
                        marker, slot.id, slot.start_time, slot.end_time
                    );
                }
            }
        }
        Command::Book { doctor_id, slot_id } => {
            ensure_authenticated(&guard, "doctor-detail")?;
            let doctor = gateway.get_doctor(doctor_id).await?;
            let schedules = ScheduleService::new(gateway.clone());
            let schedule = schedules.load_schedule(doctor_id, None).await?;

            let flow = BookingFlow::new(gateway, doctor, schedule);
            flow.select_slot(slot_id)?;
            if let Err(err) = flow.submit().await {
                bail!("Booking failed: {}", err);
            }

            let view = ConfirmationView::from_navigation(flow.take_confirmation());
            println!("{}", view.render());
        }
        Command::Appointments => {
            ensure_authenticated(&guard, "profile")?;
            for appointment in gateway.get_appointments().await? {
                println!(
                    "{:>4}  slot {:>4}  {}",
                    appointment.id, appointment.schedule_id, appointment.status
                );
            }
        }
        Command::Cancel { appointment_id } => {
            ensure_authenticated(&guard, "profile")?;
            let appointments = gateway.get_appointments().await?;
            if let Some(appointment) = appointments.iter().find(|a| a.id == appointment_id) {
                if !appointment.status.is_cancellable() {
                    bail!(
                        "Appointment {} is already {}",
                        appointment_id,
                        appointment.status
                    );
                }
            }
            gateway.cancel_appointment(appointment_id).await?;
            println!("Appointment {} cancelled", appointment_id);
        }
    }

    Ok(())
}

fn ensure_authenticated(guard: &RouteGuard, view: &str) -> Result<()> {
    match guard.evaluate(&RouteTarget::protected(view)) {
        NavigationDecision::Allow => Ok(()),
        NavigationDecision::RedirectToLogin => {
            bail!("You are not logged in. Run `clinic login` first.")
        }
    }
}
