use super::render::{print_messages, render_habit_list, render_progress};
use super::setup::{Cli, Commands};
use clap::Parser;
use habitz::api::{CmdMessage, CmdResult, ConfigAction, HabitzApi};
use habitz::error::Result;
use habitz::init::{initialize, InitOptions, SessionBackend};
use habitz::session::LoadState;
use std::io::{self, BufRead, Write};

struct AppContext {
    api: HabitzApi<SessionBackend>,
    confirm_destructive: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    let outcome = match cli.command {
        None | Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Add { name, description }) => {
            handle_add(&mut ctx, name.join(" "), description)
        }
        Some(Commands::Done { habits }) => handle_done(&mut ctx, habits),
        Some(Commands::Edit {
            habit,
            name,
            description,
        }) => handle_edit(&mut ctx, habit, name, description),
        Some(Commands::Remove { habits }) => handle_remove(&mut ctx, habits),
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Path) => handle_path(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    };

    // Writes are queued; make sure they land (or are reported) before exiting.
    report_write_failures(&ctx);
    outcome
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(InitOptions {
        verbose: cli.verbose,
        today: cli.today,
        data_dir: None,
    })?;

    if ctx.in_memory {
        eprintln!("Warning: no data directory found; habits are kept for this run only.");
    }
    if cli.verbose {
        if let Some(e) = &ctx.logging_error {
            eprintln!("Warning: file logging disabled: {}", e);
        }
    }

    if ctx.api.load_state() == LoadState::NewDay {
        print_messages(&[CmdMessage::info("New day: all habits are unchecked.")]);
    }

    Ok(AppContext {
        confirm_destructive: ctx.config.confirm_destructive,
        api: ctx.api,
    })
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    let checklist = render_habit_list(&result.listed_habits, result.progress);
    print!("{}", checklist);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, name: String, description: Option<String>) -> Result<()> {
    let result = ctx.api.add(&name, description.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_done(ctx: &mut AppContext, habits: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle(&habits)?;
    print_result_with_progress(&result);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    habit: String,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let result = ctx
        .api
        .edit(&habit, name.as_deref(), description.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, habits: Vec<String>) -> Result<()> {
    let result = ctx.api.remove(&habits)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes && ctx.confirm_destructive && !confirm("Uncheck every habit for today?")? {
        print_messages(&[CmdMessage::info("Operation cancelled.")]);
        return Ok(());
    }
    let result = ctx.api.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes
        && ctx.confirm_destructive
        && !confirm("Delete all stored habits and go back to the default list?")?
    {
        print_messages(&[CmdMessage::info("Operation cancelled.")]);
        return Ok(());
    }
    let result = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.path()?;
    for path in &result.paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_set = matches!(action, ConfigAction::Set(..));

    let result = ctx.api.config(action)?;
    if is_set {
        print_messages(&result.messages);
    } else {
        for (key, value) in &result.config_values {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

fn print_result_with_progress(result: &CmdResult) {
    print_messages(&result.messages);
    if let Some(progress) = result.progress {
        print!("{}", render_progress(progress));
    }
}

fn report_write_failures(ctx: &AppContext) {
    let failures = ctx.api.flush();
    if let Some(last) = failures.last() {
        eprintln!(
            "Warning: could not save habits ({}). Changes are kept for this run only.",
            last.message
        );
    }
}

/// Asks a yes/no question on stdin. Anything but "y"/"yes" is a no, including EOF.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
