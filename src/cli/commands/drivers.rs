use clap::Subcommand;
use serde_json::json;

use crate::api::format_date;
use crate::cli::utils::{output_empty_collection, output_json, output_success};
use crate::cli::OutputFormat;
use crate::database::models::DriverProfile;
use crate::handlers::AppState;
use crate::types::StatusUpdateRequest;

#[derive(Subcommand)]
pub enum DriverCommands {
    #[command(about = "List pending drivers with their latest onboarding records")]
    Pending,

    #[command(about = "List every driver, pending first")]
    List,

    #[command(about = "Show the full onboarding profile of one driver")]
    Show {
        #[arg(help = "Driver id")]
        driver_id: i32,
    },

    #[command(about = "Move a driver to a new status")]
    SetStatus {
        #[arg(help = "Driver id")]
        driver_id: i32,
        #[arg(help = "New status, e.g. Approved or Rejected")]
        status: String,
    },
}

pub async fn handle(cmd: DriverCommands, state: &AppState, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DriverCommands::Pending => {
            let profiles = state.profiles.list_pending_profiles().await?;
            output_profiles(&output_format, &profiles, "No pending drivers")
        }
        DriverCommands::List => {
            let profiles = state.profiles.list_all_profiles().await?;
            output_profiles(&output_format, &profiles, "No drivers")
        }
        DriverCommands::Show { driver_id } => {
            let profile = state.profiles.get_profile(driver_id).await?;
            match output_format {
                OutputFormat::Json => output_json(&profile),
                OutputFormat::Text => {
                    println!("{}", profile_details(&profile));
                    Ok(())
                }
            }
        }
        DriverCommands::SetStatus { driver_id, status } => {
            let driver = state
                .onboarding
                .update_status(StatusUpdateRequest {
                    driver_id: Some(driver_id),
                    status: Some(status),
                })
                .await?;
            output_success(
                &output_format,
                &format!("Driver {} is now '{}'", driver.driver_id, driver.status),
                Some(json!({ "driver": driver })),
            )
        }
    }
}

fn output_profiles(output_format: &OutputFormat, profiles: &[DriverProfile], empty: &str) -> anyhow::Result<()> {
    if profiles.is_empty() {
        return output_empty_collection(output_format, "drivers", empty);
    }
    match output_format {
        OutputFormat::Json => output_json(&profiles),
        OutputFormat::Text => {
            for profile in profiles {
                println!("{}", profile_summary(profile));
            }
            Ok(())
        }
    }
}

fn profile_summary(profile: &DriverProfile) -> String {
    let d = &profile.driver;
    format!(
        "#{:<6} {:<28} {:<16} registered {}  vehicle:{} background:{} insurance:{} banking:{}",
        d.driver_id,
        format!("{} {}", d.first_name, d.last_name),
        d.status,
        format_date(&d.registration_date),
        mark(profile.vehicle.is_some()),
        mark(profile.background_check.is_some()),
        mark(profile.insurance.is_some()),
        mark(profile.banking.is_some()),
    )
}

fn profile_details(profile: &DriverProfile) -> String {
    let d = &profile.driver;
    let mut lines = vec![
        format!("Driver #{}: {} {}", d.driver_id, d.first_name, d.last_name),
        format!("  Status:       {}", d.status),
        format!("  Registered:   {}", format_date(&d.registration_date)),
        format!("  Email:        {}", d.email.as_deref().unwrap_or("-")),
        format!("  Phone:        {}", d.phone_number.as_deref().unwrap_or("-")),
    ];

    lines.push(match &profile.vehicle {
        Some(v) => format!(
            "  Vehicle:      {} {} ({}) inspected {}",
            v.make.as_deref().unwrap_or("?"),
            v.model.as_deref().unwrap_or("?"),
            v.vin,
            v.inspection_date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())
        ),
        None => "  Vehicle:      -".to_string(),
    });
    lines.push(match &profile.background_check {
        Some(c) => format!(
            "  Background:   {} on {}",
            c.status.as_deref().unwrap_or("unknown"),
            c.check_date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())
        ),
        None => "  Background:   -".to_string(),
    });
    lines.push(match &profile.insurance {
        Some(i) => format!(
            "  Insurance:    {} {} from {}",
            i.provider.as_deref().unwrap_or("?"),
            i.policy_number,
            i.start_date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())
        ),
        None => "  Insurance:    -".to_string(),
    });
    lines.push(match &profile.banking {
        Some(b) => format!("  Banking:      {}", b.bank_name.as_deref().unwrap_or("?")),
        None => "  Banking:      -".to_string(),
    });

    lines.join("\n")
}

fn mark(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}
