//! Meeting command handlers
//!
//! The countdown runs on a one-second tokio interval and stops early on
//! Ctrl-C. In a terminal it also reads `p`, `r` and `q` lines from stdin.
//! Nothing here touches the state document.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::{interval, MissedTickBehavior};

use pyp_core::meeting::{agenda, Countdown, TalkingQueue, TickOutcome, AGENDAS, CLOSING_RITUALS};

use crate::output::{Output, OutputFormat, Severity};

/// Show both agendas
pub fn agendas(output: &Output) -> Result<()> {
    output.print_agendas(&AGENDAS)
}

/// Count down `minutes`
pub async fn timer(minutes: u32, output: &Output) -> Result<()> {
    let mut keys = key_reader(output);
    run_countdown("Timer", minutes, &mut keys, output).await?;
    Ok(())
}

/// Time each segment of an agenda in turn
pub async fn agenda_timer(key: &str, output: &Output) -> Result<()> {
    let agenda = agenda(key).ok_or_else(|| {
        anyhow!(
            "Unknown agenda '{}'. Available: {}",
            key,
            AGENDAS.iter().map(|a| a.key).collect::<Vec<_>>().join(", ")
        )
    })?;

    output.message(&format!("{} ({} min)", agenda.title, agenda.total_minutes()));
    let mut keys = key_reader(output);
    for segment in agenda.segments {
        if !run_countdown(segment.name, segment.minutes, &mut keys, output).await? {
            break;
        }
    }
    Ok(())
}

/// Keys accepted while a countdown runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKey {
    Toggle,
    Reset,
    Stop,
}

fn parse_timer_key(input: &str) -> Option<TimerKey> {
    match input.trim().to_lowercase().as_str() {
        "p" | "pause" | "resume" => Some(TimerKey::Toggle),
        "r" | "reset" => Some(TimerKey::Reset),
        "q" | "quit" | "stop" => Some(TimerKey::Stop),
        _ => None,
    }
}

type Keys = Option<UnboundedReceiver<String>>;

/// Forward stdin lines while a clock is shown in a terminal
///
/// A plain thread so a pending read never holds up runtime shutdown.
fn key_reader(output: &Output) -> Keys {
    if output.format != OutputFormat::Human || !atty::is(atty::Stream::Stdin) {
        return None;
    }

    let (tx, rx) = unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    Some(rx)
}

async fn next_key(keys: &mut Keys) -> Option<String> {
    match keys {
        Some(rx) => rx.recv().await,
        None => None,
    }
}

/// Drive one countdown; returns false when interrupted
async fn run_countdown(
    label: &str,
    minutes: u32,
    keys: &mut Keys,
    output: &Output,
) -> Result<bool> {
    let mut countdown = Countdown::start(minutes);
    let show_clock = output.format == OutputFormat::Human;

    let mut ticker = interval(Countdown::TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // first tick fires immediately
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if keys.is_some() {
        println!("p: pause/resume | r: reset | q: stop  (then Enter)");
    }
    if show_clock {
        print!("{}: {}", label, countdown.display());
        io::stdout().flush()?;
    }

    while countdown.duration > 0 && !countdown.is_finished() {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = countdown.tick();
                if show_clock && outcome != TickOutcome::Idle {
                    print!("\r{}: {}", label, countdown.display());
                    io::stdout().flush()?;
                }
                if outcome == TickOutcome::Finished {
                    if show_clock {
                        // terminal bell in place of the chime
                        println!("\x07");
                    }
                    output.notify(Severity::Info, &format!("{} complete!", label));
                }
            }
            Some(line) = next_key(keys), if keys.is_some() => {
                match parse_timer_key(&line) {
                    Some(TimerKey::Toggle) => countdown.toggle(),
                    Some(TimerKey::Reset) => countdown.reset(),
                    Some(TimerKey::Stop) => {
                        countdown.pause();
                        output.warning(&format!("{} stopped with {} left", label, countdown.display()));
                        return Ok(false);
                    }
                    None => {}
                }
                let paused = if countdown.running { "" } else { " (paused)" };
                print!("{}: {}{}", label, countdown.display(), paused);
                io::stdout().flush()?;
            }
            _ = &mut ctrl_c => {
                countdown.pause();
                if show_clock {
                    println!();
                }
                output.warning(&format!("{} stopped with {} left", label, countdown.display()));
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Pass the talking stick around
///
/// Interactive in a terminal: Enter passes the stick, `+name` joins the
/// queue, `-N` removes the N-th waiting speaker, `c` empties the circle and
/// `q` ends it.
pub fn queue(names: Vec<String>, output: &Output) -> Result<()> {
    let mut queue = TalkingQueue::new();
    for name in &names {
        queue.add(name);
    }

    if !output.should_prompt() || !atty::is(atty::Stream::Stdin) {
        let order: Vec<&str> = queue.waiting().collect();
        match output.format {
            OutputFormat::Json => output.print_json(&serde_json::json!({ "order": order }))?,
            _ => {
                for (i, name) in order.iter().enumerate() {
                    println!("{}. {}", i + 1, name);
                }
            }
        }
        return Ok(());
    }

    println!("Enter: pass the stick | +name: join | -N: remove | c: clear | q: close the circle");
    print_queue(&queue);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            "q" | "quit" => break,
            "c" | "clear" => queue.clear(),
            "" => match queue.next() {
                Some(speaker) => println!("\x07Talking stick: {}", speaker),
                None => println!("Nobody is waiting."),
            },
            _ if input.starts_with('+') => {
                if !queue.add(&input[1..]) {
                    println!("Give a name after +");
                }
            }
            _ if input.starts_with('-') => match input[1..].trim().parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if queue.remove(n - 1).is_none() {
                        println!("No speaker at position {}", n);
                    }
                }
                _ => println!("Give a position after -, e.g. -2"),
            },
            name => {
                queue.add(name);
            }
        }
        print_queue(&queue);
    }

    output.success("Circle closed");
    Ok(())
}

fn print_queue(queue: &TalkingQueue) {
    if let Some(current) = queue.current() {
        println!("Speaking: {}", current);
    }
    if queue.is_empty() {
        println!("Waiting:  (none)");
    } else {
        let waiting: Vec<String> = queue
            .waiting()
            .enumerate()
            .map(|(i, name)| format!("{}. {}", i + 1, name))
            .collect();
        println!("Waiting:  {}", waiting.join("  "));
    }
}

/// Suggestions for closing a circle
pub fn rituals(output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => output.print_json(&CLOSING_RITUALS)?,
        _ => {
            for ritual in CLOSING_RITUALS {
                println!("- {}", ritual);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timer_key() {
        assert_eq!(parse_timer_key("p"), Some(TimerKey::Toggle));
        assert_eq!(parse_timer_key(" Resume "), Some(TimerKey::Toggle));
        assert_eq!(parse_timer_key("r"), Some(TimerKey::Reset));
        assert_eq!(parse_timer_key("q"), Some(TimerKey::Stop));
        assert_eq!(parse_timer_key(""), None);
        assert_eq!(parse_timer_key("x"), None);
    }
}
