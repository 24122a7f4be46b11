use super::{json_pretty, load_resources, status_label, EXIT_SUCCESS};
use devcompose_core::{partition, resolve_package};
use devcompose_schema::Package;
use std::path::PathBuf;

pub fn run(files: &[PathBuf], json: bool) -> Result<u8, String> {
    let resources = load_resources(files)?;
    let parts = partition(&resources);

    let deployments: Vec<_> = parts
        .deployments
        .values()
        .map(|d| {
            let reference = d.package_ref();
            let resolved =
                resolve_package(&parts.packages, &reference.name_or_guid, &reference.version);
            (d, reference, resolved)
        })
        .collect();

    if json {
        let deployment_rows: Vec<_> = deployments
            .iter()
            .map(|(d, reference, resolved)| {
                serde_json::json!({
                    "name": d.name(),
                    "package": reference.name_or_guid,
                    "version": reference.version,
                    "error": resolved.as_ref().err().map(ToString::to_string),
                })
            })
            .collect();
        let package_rows: Vec<_> = parts
            .packages
            .values()
            .map(|p| {
                serde_json::json!({
                    "name": p.name(),
                    "version": p.version(),
                    "ros": p.ros_enabled(),
                    "executables": executable_names(p),
                })
            })
            .collect();
        let payload = serde_json::json!({
            "deployments": deployment_rows,
            "packages": package_rows,
        });
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    if deployments.is_empty() && parts.packages.is_empty() {
        println!("no device deployments or packages found");
        return Ok(EXIT_SUCCESS);
    }

    println!("{:<20} {:<20} {:<10} STATUS", "DEPLOYMENT", "PACKAGE", "VERSION");
    for (d, reference, resolved) in &deployments {
        println!(
            "{:<20} {:<20} {:<10} {}",
            d.name(),
            reference.name_or_guid,
            reference.version,
            status_label(resolved.is_ok())
        );
    }
    println!();
    println!("{:<20} {:<10} {:<5} EXECUTABLES", "PACKAGE", "VERSION", "ROS");
    for p in parts.packages.values() {
        println!(
            "{:<20} {:<10} {:<5} {}",
            p.name(),
            p.version(),
            if p.ros_enabled() { "yes" } else { "no" },
            executable_names(p).join(",")
        );
    }
    Ok(EXIT_SUCCESS)
}

fn executable_names(package: &Package) -> Vec<&str> {
    package
        .spec
        .executables
        .iter()
        .map(|e| e.name.as_str())
        .collect()
}
