//! Post-run report using cliclack

use crate::generator::{ProjectSpec, ProvisioningResult};
use crate::toolchain::Toolchain;
use anyhow::Result;

/// Print every diagnostic the run produced, then the next steps
///
/// Failures are reported, never returned: the wizard exits cleanly either way.
pub fn report<T: Toolchain>(
    toolchain: &T,
    project: Option<&ProjectSpec>,
    result: Option<&ProvisioningResult>,
) -> Result<()> {
    let (project, result) = match (project, result) {
        (None, _) => {
            cliclack::outro("See you later!")?;
            return Ok(());
        }
        (Some(project), None) => {
            cliclack::log::warning(format!(
                "Generation of '{}' did not report back; the project may be incomplete",
                project.name
            ))?;
            cliclack::outro("See you later!")?;
            return Ok(());
        }
        (Some(project), Some(result)) => (project, result),
    };

    for warning in &result.warnings {
        cliclack::log::warning(warning)?;
    }
    for (dependency, error) in &result.dependency_errors {
        cliclack::log::warning(format!("{} ({})", error, dependency))?;
    }
    for (path, error) in &result.file_errors {
        cliclack::log::error(format!("{}: {}", path.display(), error))?;
    }

    let files = result.tree_files();
    if result.overall_succeeded {
        cliclack::log::success(format!(
            "Created {} files in {}",
            files.len(),
            result.root.display()
        ))?;
    } else {
        cliclack::log::error(format!(
            "{} of {} files in {} could not be generated",
            result.file_errors.len(),
            files.len() + result.file_errors.len(),
            result.root.display()
        ))?;
    }

    print_next_steps(toolchain, result)?;

    if result.overall_succeeded {
        cliclack::outro(format!("Happy coding with {}!", project.name))?;
    } else {
        cliclack::outro("Finished with errors. Re-running is safe.")?;
    }
    Ok(())
}

fn print_next_steps<T: Toolchain>(toolchain: &T, result: &ProvisioningResult) -> Result<()> {
    let steps = toolchain.next_steps(&result.root);
    if steps.is_empty() {
        return Ok(());
    }

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();

    Ok(())
}
