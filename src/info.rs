use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

/// Resolves a placeholder name to its display value.
///
/// Names are matched case-insensitively. Unknown names and values that cannot
/// be determined resolve to an empty string; this never fails.
pub trait InfoProvider {
    fn resolve(&self, name: &str) -> String;
}

impl<P: InfoProvider + ?Sized> InfoProvider for &P {
    fn resolve(&self, name: &str) -> String {
        (**self).resolve(name)
    }
}

/// Fixed name/value pairs.
#[derive(Debug, Default, Clone)]
pub struct StaticInfo {
    values: HashMap<String, String>,
    lookups: RefCell<Vec<String>>,
}

impl StaticInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Names asked for so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl InfoProvider for StaticInfo {
    fn resolve(&self, name: &str) -> String {
        let key = name.to_ascii_lowercase();
        let value = self.values.get(&key).cloned().unwrap_or_default();
        self.lookups.borrow_mut().push(key);
        value
    }
}

/// Probes the live system. Each value is computed at most once per run.
#[derive(Default)]
pub struct SystemInfo {
    system: OnceCell<System>,
    cache: RefCell<HashMap<String, String>>,
}

impl SystemInfo {
    pub fn new() -> Self {
        Self::default()
    }

    fn system(&self) -> &System {
        self.system.get_or_init(|| {
            System::new_with_specifics(
                RefreshKind::nothing()
                    .with_cpu(CpuRefreshKind::nothing())
                    .with_memory(MemoryRefreshKind::nothing().with_ram()),
            )
        })
    }

    fn probe(&self, name: &str) -> String {
        match name {
            "username" => username(),
            "hostname" => hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "unknown".to_string()),
            "os" => distro_id()
                .map(|d| capitalize_first(&d))
                .unwrap_or_else(|| "unknown".to_string()),
            "host" => motherboard().unwrap_or_default(),
            "kernel" => System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            "cpu" => self
                .system()
                .cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .unwrap_or_default(),
            "gpu" => gpu_name().unwrap_or_default(),
            "ram" => {
                let sys = self.system();
                memory_usage(sys.total_memory(), sys.available_memory()).unwrap_or_default()
            }
            "shell" => std::env::var("SHELL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "unknown".to_string()),
            "uptime" => format_uptime(System::uptime()),
            "wm" => capitalize_first(&window_manager()),
            "shell_info" => shell_info(),
            "monitor" => monitor_info().unwrap_or_else(|| "unknown".to_string()),
            "disk" => disk_usage().unwrap_or_else(|| "unknown".to_string()),
            "packages" => package_count(distro_id().as_deref()),
            _ => String::new(),
        }
    }
}

impl InfoProvider for SystemInfo {
    fn resolve(&self, name: &str) -> String {
        let key = name.to_ascii_lowercase();
        // Each value is probed at most once per run
        if let Some(value) = self.cache.borrow().get(&key) {
            return value.clone();
        }

        let value = self.probe(&key);
        log::debug!("resolved %{}% -> {:?}", key, value);
        self.cache.borrow_mut().insert(key, value.clone());
        value
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn username() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|u| !u.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// The `ID=` field of the os-release file, e.g. `arch` or `debian`.
pub fn distro_id() -> Option<String> {
    let id = System::distribution_id();
    if id.is_empty() || id == std::env::consts::OS {
        None
    } else {
        Some(id)
    }
}

fn read_trimmed(path: &str) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}

fn motherboard() -> Option<String> {
    let vendor = read_trimmed("/sys/class/dmi/id/board_vendor")?;
    let vendor = vendor.split_whitespace().next().unwrap_or("").to_string();
    let model = read_trimmed("/sys/class/dmi/id/board_name")?;

    if model.is_empty() {
        Some(vendor)
    } else {
        Some(format!("{} {}", vendor, model))
    }
}

/// Stdout of a command split into lines, if it could be spawned.
fn command_lines(program: &str, args: &[&str]) -> Option<Vec<String>> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        log::debug!("{} exited with {}", program, output.status);
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(stdout.lines().map(str::to_string).collect())
}

fn gpu_name() -> Option<String> {
    let lines = command_lines("lspci", &[])?;
    let line = lines.iter().find(|l| {
        let upper = l.to_ascii_uppercase();
        upper.contains("VGA") || upper.contains("3D") || upper.contains("DISPLAY")
    })?;
    parse_lspci_gpu(line)
}

/// Prefer the bracketed marketing name; fall back to everything after the
/// device class.
fn parse_lspci_gpu(line: &str) -> Option<String> {
    if let (Some(open), Some(close)) = (line.find('['), line.find(']'))
        && open < close
    {
        return Some(line[open + 1..close].to_string());
    }
    let (_, rest) = line.split_once(": ")?;
    Some(rest.trim().to_string())
}

fn memory_usage(total: u64, available: u64) -> Option<String> {
    if total == 0 {
        return None;
    }
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
    let used = total.saturating_sub(available);
    Some(format!(
        "{:.1}/{:.1} GB",
        used as f64 / GIB,
        total as f64 / GIB
    ))
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

fn window_manager() -> String {
    let raw = ["XDG_CURRENT_DESKTOP", "DESKTOP_SESSION", "GDMSESSION"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    clean_wm_name(&raw).to_string()
}

/// `XDG_CURRENT_DESKTOP` may list several desktops separated by `:`.
fn clean_wm_name(raw: &str) -> &str {
    raw.split(':').next().unwrap_or(raw)
}

fn shell_info() -> String {
    let path = std::env::var("SHELL").ok().filter(|s| !s.is_empty());
    let Some(path) = path else {
        return "unknown".to_string();
    };
    let name = Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());

    // Shells disagree on the version flag; take the first that prints something
    for flag in ["--version", "-version", "-v", "-V"] {
        let first = command_lines(&path, &[flag]).and_then(|lines| lines.into_iter().next());
        if let Some(line) = first {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return if line.starts_with(&name) {
                line.to_string()
            } else {
                format!("{} {}", name, line)
            };
        }
    }

    // Fall back to the version the shell exports about itself
    let version_var = match name.as_str() {
        "bash" => Some("BASH_VERSION"),
        "zsh" => Some("ZSH_VERSION"),
        "fish" => Some("FISH_VERSION"),
        "ksh" => Some("KSH_VERSION"),
        _ => None,
    };
    match version_var.and_then(|var| std::env::var(var).ok()) {
        Some(version) if !version.is_empty() => format!("{} {}", name, version),
        _ => name,
    }
}

fn monitor_info() -> Option<String> {
    let lines = command_lines("xrandr", &["--current"])?;
    lines.iter().find(|l| l.contains('*')).and_then(|l| parse_xrandr_mode(l))
}

/// `   2560x1440     59.95*+  ...` -> `2560x1440 @ 59.95Hz`
fn parse_xrandr_mode(line: &str) -> Option<String> {
    let mut fields = line.split_whitespace();
    let resolution = fields.next()?;
    let rate = fields.find(|f| f.contains('*'))?;
    let rate = rate.trim_end_matches(['*', '+']);
    Some(format!("{} @ {}Hz", resolution, rate))
}

fn disk_usage() -> Option<String> {
    let disks = Disks::new_with_refreshed_list();
    let root = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))?;

    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
    let total = root.total_space();
    let used = total.saturating_sub(root.available_space());
    Some(format!(
        "{:.1}G / {:.1}G",
        used as f64 / GIB,
        total as f64 / GIB
    ))
}

/// Package manager invocation that lists one installed package per line.
fn package_command(distro: &str) -> Option<(&'static str, &'static str)> {
    match distro {
        "arch" | "archlinux" | "endeavouros" => Some(("pacman", "-Qq")),
        "debian" | "ubuntu" | "linuxmint" => Some(("dpkg", "--get-selections")),
        "fedora" | "rhel" | "redhat" => Some(("rpm", "-qa")),
        "void" => Some(("xbps-query", "-l")),
        _ => None,
    }
}

fn package_count(distro: Option<&str>) -> String {
    let Some((program, arg)) = distro.and_then(package_command) else {
        return "unknown".to_string();
    };
    match command_lines(program, &[arg]) {
        Some(lines) => format!("{} pkgs", lines.len()),
        None => "unknown".to_string(),
    }
}
