use devcompose_schema::VolumeMount;

/// Platform mounts every device service receives, as `"src:dst:mode"`.
pub const BASELINE_VOLUMES: &[&str] = &[
    "/etc/devcompose:/etc/devcompose:ro",
    "/var/log/devcompose:/var/log/devcompose:rw",
    "/var/log/ros:/root/.ros/log:rw",
    "/var/lib/docker:/var/lib/docker:rslave",
    "/var/run/docker.sock:/var/run/docker.sock:rw",
    "/dev:/dev:rslave",
];

/// Permission codes that map to a writable bind mount.
const PERMISSION_MODES: &[(u32, &str)] = &[(755, "rw"), (777, "rw")];

const DEFAULT_MODE: &str = "rslave";

pub fn mode_for(perm: u32) -> &'static str {
    PERMISSION_MODES
        .iter()
        .find(|(code, _)| *code == perm)
        .map_or(DEFAULT_MODE, |&(_, mode)| mode)
}

/// Baseline mounts followed by each deployment volume that has both a source
/// sub-path and a mount path. Empty paths count as missing.
pub fn build_volumes(mounts: &[VolumeMount]) -> Vec<String> {
    let mut volumes: Vec<String> = BASELINE_VOLUMES.iter().map(|v| (*v).to_owned()).collect();
    for mount in mounts {
        let src = non_empty(mount.sub_path.as_deref());
        let dst = non_empty(mount.mount_path.as_deref());
        let (Some(src), Some(dst)) = (src, dst) else {
            continue;
        };
        let mode = mount.perm.map_or(DEFAULT_MODE, mode_for);
        volumes.push(format!("{src}:{dst}:{mode}"));
    }
    volumes
}

fn non_empty(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.is_empty())
}
