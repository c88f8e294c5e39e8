//! Development harness: prints the configured step plan for every
//! (role, jurisdiction) combination the registry supports.

use signup_flow::config::ClientConfig;
use signup_flow::flow::{Jurisdiction, Role};
use signup_flow::get_signup_config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::from_env()?;
    println!("signup-flow v{}", env!("CARGO_PKG_VERSION"));
    println!("Backend: {}", config.base_url);
    println!();

    for role in Role::ALL {
        for jurisdiction in Jurisdiction::ALL {
            let flow = get_signup_config(role, jurisdiction);
            let mut plan: Vec<String> = Vec::new();
            for step in &flow.steps {
                if step.gate.is_open() {
                    plan.push(format!("{} (open)", step.label));
                } else {
                    plan.push(step.label.to_string());
                }
            }
            println!(
                "{:>15} / {:<20} {}",
                role.to_string(),
                jurisdiction.to_string(),
                plan.join(" → ")
            );
        }
    }

    Ok(())
}
