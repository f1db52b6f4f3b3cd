use anyhow::Result;

use easer_core::{easing, AnimationConfig};

pub fn run(defaults: &AnimationConfig) -> Result<()> {
    println!("Easing curves:\n");

    for name in easing::names() {
        let marker = if name == defaults.easing { " (default)" } else { "" };
        println!("  {}{}", name, marker);
    }

    println!("\nTo play one, run:");
    println!("  easer run -e <name> -d <ms>");

    Ok(())
}
