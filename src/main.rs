use anyhow::{bail, Context, Result};
use std::env;
use std::path::Path;

use school_registry::{
    init_tracing, load_roster, seed_registry, RegistryConfig, SharedRegistry, Student,
    StudentStatus,
};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let config = RegistryConfig::from_env()?;

    match args.get(1).map(String::as_str) {
        Some("import") => {
            let path = args
                .get(2)
                .map(Path::new)
                .or(config.roster.as_deref())
                .context("Usage: school-registry import <roster.csv>")?;
            run_import(&config, path)?;
        }
        Some("demo") | None => run_demo(&config)?,
        Some(other) => bail!("Unknown command: {} (expected `demo` or `import`)", other),
    }

    Ok(())
}

fn run_demo(config: &RegistryConfig) -> Result<()> {
    println!("🎓 School Registry - Deployment Demo");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let owner = config.owner.clone();
    let registry = SharedRegistry::new(owner.clone());
    println!("✓ Registry created, owner: {}", owner);

    // 1. Register students
    println!("\n📝 Registering students...");
    for (name, age) in [("Mary Jane", 20), ("Joy Okoye", 22), ("Lewis John", 19)] {
        let id = registry.register_student(&owner, name, age)?;
        println!("✓ Registered #{}: {}, Age {}", id, name, age);
    }

    // 2. Listing
    println!("\nTotal students registered: {}", registry.get_student_count());
    print_students(&registry.get_all());

    // 3. Status change
    println!("\n🔄 Updating student status...");
    registry.update_student_status(&owner, 2, StudentStatus::Deferred)?;
    let student = registry.get_by_id(2)?;
    println!("✓ Verified: {} - Status: {}", student.name, student.status);

    let active = registry.get_all().iter().filter(|s| s.is_active()).count();
    println!("✓ Active students: {}/{}", active, registry.get_student_count());

    // 4. Audit trail
    println!("\n📜 Audit trail");
    for event in registry.events() {
        println!("  {}", event.summary());
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✅ Demo completed ({} audit events recorded)", registry.events().len());

    Ok(())
}

fn run_import(config: &RegistryConfig, path: &Path) -> Result<()> {
    println!("📂 Loading roster from {:?}...", path);
    let rows = load_roster(path)?;
    println!("✓ Loaded {} roster rows", rows.len());

    let registry = SharedRegistry::new(config.owner.clone());
    let ids = seed_registry(&registry, &config.owner, &rows)?;
    println!("✓ Registered {} students", ids.len());

    let json = serde_json::to_string_pretty(&registry.get_all())?;
    println!("{}", json);

    Ok(())
}

fn print_students(students: &[Student]) {
    println!("\n--- All Students ---");
    for (i, student) in students.iter().enumerate() {
        println!(
            "{}. {} (Age: {}, Status: {})",
            i + 1,
            student.name,
            student.age,
            student.status
        );
    }
}
