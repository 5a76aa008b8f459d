use crate::persona::Persona;

pub fn execute() -> anyhow::Result<()> {
    println!("\n=== Personas ===\n");
    for (idx, persona) in Persona::all().iter().enumerate() {
        println!(
            "{}. {} {} - {} ({})",
            idx + 1,
            persona.icon(),
            persona.display_name(),
            persona.title(),
            persona.id()
        );
        println!("   {}", persona.description());
    }
    println!();
    Ok(())
}
