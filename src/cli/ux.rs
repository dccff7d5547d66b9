use crate::cli::output::{CommandData, SquallOutput, SquallStatus};
use crate::migration::Migration;
use crate::SquallError;
use std::fmt::Write;


pub fn setup_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), SquallError> {
    if json {
        // Mute all logging if JSON output is enabled
        tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())?;
        return Ok(());
    }

    let level = if quiet {
        tracing::Level::ERROR
    } else { match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }};

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}


pub fn format_migration_plan(migrations: &[Migration]) -> String {
    let mut output = "--- Migration plan ---".to_string();

    if migrations.is_empty() {
        output.push_str("\nNothing to apply.");
    }

    for migration in migrations {
        let statements = migration.statements();

        // Writing to a String can't fail.
        let _ = write!(
            &mut output,
            "\n---\nMigration {}: '{}' -> {} statement(s)",
            migration.id,
            migration.name,
            statements.len(),
        );

        for stmt in &statements {
            let _ = write!(&mut output, "\n\t-> {}", stmt.lines().next().unwrap_or_default());
        }
    }

    output.push_str("\n--- End of migration plan ---");
    output
}

pub fn show_migration_plan(migrations: &[Migration]) {
    tracing::info!("{}", format_migration_plan(migrations));
}


pub fn render_human_output(output: &SquallOutput<CommandData>) {
    match output.status {
        SquallStatus::Success => match &output.data {
            Some(CommandData::Up(report)) if report.migrated => {
                println!("{}: done, watermark at {}", output.command, report.watermark)
            }
            Some(CommandData::Up(_)) => println!("{}: no migrations found", output.command),
            Some(CommandData::Plan(pending)) => {
                println!("{}: {} pending migration(s)", output.command, pending.len())
            }
            _ => println!("{}: ok", output.command),
        },
        SquallStatus::Error => {
            if let Some(error) = &output.error {
                eprintln!("{}: failed ({:?})", output.command, error);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_lists_each_statement_first_line() {
        let migrations = vec![
            Migration::new(1, "1.init.sql", "create table a (\n  x\n);\ninsert into a values (1);"),
            Migration::new(2, "2.empty.sql", "# nothing here\n"),
        ];

        let text = format_migration_plan(&migrations);

        assert!(text.contains("Migration 1: '1.init.sql' -> 2 statement(s)"));
        assert!(text.contains("\t-> create table a ("));
        assert!(text.contains("\t-> insert into a values (1)"));
        assert!(text.contains("Migration 2: '2.empty.sql' -> 0 statement(s)"));
        assert!(text.ends_with("--- End of migration plan ---"));
    }

    #[test]
    fn empty_plan() {
        assert!(format_migration_plan(&[]).contains("Nothing to apply."));
    }
}
