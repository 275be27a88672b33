//! Entry point for the gazetop TUI. Parses args, resolves the broker profile
//! and runs the App fed by either the MQTT receiver or the demo generator.

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use gazetop::app::App;
use gazetop::demo::spawn_demo;
use gazetop::history::DEFAULT_CAPACITY;
use gazetop::logging;
use gazetop::mqtt::{spawn_receiver, BrokerTarget, DEFAULT_PORT};
use gazetop::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use tokio::sync::mpsc::unbounded_channel;

const USAGE: &str = "[--broker HOST|-b HOST] [--port PORT|-p PORT] [--topic TOPIC|-T TOPIC] [--capacity N|-n N] [--profile NAME|-P NAME] [--save] [--demo] [--dry-run] [mqtt://HOST:PORT/TOPIC]";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    broker: Option<String>,
    port: Option<u16>,
    topic: Option<String>,
    capacity: Option<i64>,
    profile: Option<String>,
    save: bool,
    demo: bool,
    dry_run: bool,
}

impl ParsedArgs {
    // Any of url/broker/port/topic makes an explicit target; flags win over the url
    fn target(&self) -> anyhow::Result<Option<BrokerTarget>> {
        if self.url.is_none()
            && self.broker.is_none()
            && self.port.is_none()
            && self.topic.is_none()
        {
            return Ok(None);
        }
        let mut t = match self.url.as_deref() {
            Some(u) => BrokerTarget::from_url(u)?,
            None => BrokerTarget::default(),
        };
        if let Some(b) = &self.broker {
            t.broker = b.clone();
        }
        if let Some(p) = self.port {
            t.port = p;
        }
        if let Some(topic) = &self.topic {
            t.topic = topic.clone();
        }
        Ok(Some(t))
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "gazetop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "-h" | "--help" => return Err(format!("Usage: {prog} {USAGE}")),
            "--save" => out.save = true,
            "--demo" => out.demo = true,
            "--dry-run" => out.dry_run = true,
            "--broker" | "-b" | "--port" | "-p" | "--topic" | "-T" | "--capacity" | "-n"
            | "--profile" | "-P" => {
                let Some(v) = inline.or_else(|| it.next()).filter(|v| !v.is_empty()) else {
                    return Err(format!("Missing value for {flag}. Usage: {prog} {USAGE}"));
                };
                match flag.as_str() {
                    "--broker" | "-b" => out.broker = Some(v),
                    "--topic" | "-T" => out.topic = Some(v),
                    "--profile" | "-P" => out.profile = Some(v),
                    "--port" | "-p" => {
                        out.port = Some(v.parse().map_err(|_| format!("Invalid port: {v}"))?)
                    }
                    _ => {
                        out.capacity =
                            Some(v.parse().map_err(|_| format!("Invalid capacity: {v}"))?)
                    }
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown flag {arg}. Usage: {prog} {USAGE}"));
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. Usage: {prog} {USAGE}"));
                }
            }
        }
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            if msg.starts_with("Usage:") {
                return Ok(());
            }
            std::process::exit(2);
        }
    };
    logging::init_from_env()?;

    // Demo mode short-circuit
    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        let capacity = parsed.capacity.unwrap_or(DEFAULT_CAPACITY);
        return run_demo_mode(capacity, parsed.dry_run).await;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        target: parsed.target()?,
        capacity: parsed.capacity,
    };
    let resolved = req.resolve(&profiles_file);

    let mut profiles_mut = profiles_file.clone();
    let entry: ProfileEntry = match resolved {
        ResolveProfile::Direct(mut entry) => {
            if let Some(name) = parsed.profile.as_ref() {
                let existing = profiles_mut.profiles.get(name).cloned();
                // Without -n the stored capacity carries over
                if entry.capacity.is_none() {
                    entry.capacity = existing.as_ref().and_then(|e| e.capacity);
                }
                match existing {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut.profiles.insert(name.clone(), entry.clone());
                        save_profiles(&profiles_mut).context("save profiles")?;
                    }
                    Some(existing) if existing != entry => {
                        let overwrite = parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ));
                        if overwrite {
                            profiles_mut.profiles.insert(name.clone(), entry.clone());
                            save_profiles(&profiles_mut).context("save profiles")?;
                        }
                    }
                    Some(_) => {}
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::Defaults => ProfileEntry {
            target: BrokerTarget::default(),
            capacity: parsed.capacity,
        },
        ResolveProfile::PromptSelect(mut names) => {
            // Always add demo option to list
            if !names.iter().any(|n| n == "demo") {
                names.push("demo".into());
            }
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let Some(name) = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| names.get(idx))
            else {
                return Ok(());
            };
            if name == "demo" {
                let capacity = parsed.capacity.unwrap_or(DEFAULT_CAPACITY);
                return run_demo_mode(capacity, parsed.dry_run).await;
            }
            let Some(entry) = profiles_mut.profiles.get(name) else {
                return Ok(());
            };
            let mut entry = entry.clone();
            if parsed.capacity.is_some() {
                entry.capacity = parsed.capacity;
            }
            entry
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let broker = prompt_string("Enter broker host: ")?;
            if broker.trim().is_empty() {
                return Ok(());
            }
            let port = prompt_string(&format!("Enter port (blank for {DEFAULT_PORT}): "))?;
            let port = match port.trim() {
                "" => DEFAULT_PORT,
                p => p.parse().with_context(|| format!("invalid port {p:?}"))?,
            };
            let topic = prompt_string("Enter topic (blank for default): ")?;
            let mut target = BrokerTarget {
                broker: broker.trim().to_string(),
                port,
                ..BrokerTarget::default()
            };
            if !topic.trim().is_empty() {
                target.topic = topic.trim().to_string();
            }
            let entry = ProfileEntry {
                target,
                capacity: parsed.capacity,
            };
            profiles_mut.profiles.insert(name, entry.clone());
            save_profiles(&profiles_mut).context("save profiles")?;
            entry
        }
    };

    let capacity = entry.capacity.unwrap_or(DEFAULT_CAPACITY);
    let target = entry.target;
    let mut app = App::new(capacity, target.label())?;
    if parsed.dry_run {
        println!("{} (capacity {capacity})", target.label());
        return Ok(());
    }

    let (tx, rx) = unbounded_channel();
    let receiver = spawn_receiver(target, tx);
    let res = app.run(rx).await;
    receiver.abort();
    res
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

// --- Demo Mode ---

async fn run_demo_mode(capacity: i64, dry_run: bool) -> anyhow::Result<()> {
    let mut app = App::new(capacity, "demo")?;
    if dry_run {
        println!("demo (capacity {capacity})");
        return Ok(());
    }
    let (tx, rx) = unbounded_channel();
    let generator = spawn_demo(tx, Duration::from_millis(500));
    // Use select to handle Ctrl-C and normal quit
    let res = tokio::select! {
        res = app.run(rx) => res,
        _ = tokio::signal::ctrl_c() => Ok(()),
    };
    generator.abort();
    res
}
