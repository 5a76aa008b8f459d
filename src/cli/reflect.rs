//! CLI handler for the `reflect` subcommand

use crate::api::{ReflectRequest, ReflectResponse};
use crate::cli::{load_config, pairs_to_map, ReflectArgs};
use crate::orchestrator::Orchestrator;
use crate::output::write_reflection_report;
use crate::runner::FALLBACK_TEXT;
use tracing::info;

pub async fn execute(args: ReflectArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;

    let request = ReflectRequest {
        user_id: args.user_id,
        dilemma: args.dilemma.join(" "),
        context: pairs_to_map(&args.context),
    };

    let orchestrator = Orchestrator::from_config(&config);
    let response = orchestrator.handle_reflect(request).await?;

    if let Some(dir) = &args.common.out_dir {
        let path = write_reflection_report(dir, &response)?;
        info!("Wrote report: {}", path.display());
    }

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_reflection(&response);
    }

    Ok(())
}

fn print_reflection(response: &ReflectResponse) {
    println!("\n=== Reflection {} ===\n", response.request_id);

    for persona in &response.responses {
        let marker = if persona.text == FALLBACK_TEXT {
            " [unavailable]"
        } else {
            ""
        };
        println!("{} {}{}", persona.icon, persona.display_name, marker);
        for line in persona.text.lines() {
            println!("   {}", line);
        }
        println!();
    }

    println!("Suggested actions:");
    for (idx, action) in response.suggested_actions.iter().enumerate() {
        println!("  {}. {}", idx + 1, action);
    }
    println!();
}
