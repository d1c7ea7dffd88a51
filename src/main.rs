mod cli;

use sartthi::api::{self, ApiState, DocsRepository};
use sartthi::auth::Session;
use sartthi::config::Config;
use sartthi::docs::{DocArticle, DocArticleUpdate, DocsClient, NewDocArticle, group_by_category};
use sartthi::store::{AppState, Store, StoreHandle, StoreOptions, ToastKind, parse_actions};
use sartthi::utils::paths::{ensure_sartthi_dir_exists, get_crash_log_path, get_logs_dir};

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use clap::Parser;
use cli::{ArticleFields, Cli, Commands, DocsCommand, StoreCommand};
use std::fs;
use std::io::{Read, Write};
use std::panic;
use std::path::Path;

/// Text of the panic payload, when it is a string.
fn panic_message(info: &panic::PanicHookInfo<'_>) -> Option<String> {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}

fn crash_report(info: &panic::PanicHookInfo<'_>) -> String {
    let thread = std::thread::current();
    let mut report = format!(
        "=== sartthi {} crashed at {} (thread {}) ===\n",
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        thread.name().unwrap_or("unnamed")
    );
    report.push_str(&format!(
        "Message: {}\n",
        panic_message(info).as_deref().unwrap_or("<non-string payload>")
    ));
    if let Some(location) = info.location() {
        report.push_str(&format!("Location: {}\n", location));
    }
    report.push_str(&format!(
        "\nBacktrace:\n{}\n\n",
        std::backtrace::Backtrace::force_capture()
    ));
    report
}

/// Appends panics to ~/.sartthi/crash.log before the default hook prints them.
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let Ok(path) = get_crash_log_path() else {
            default_hook(info);
            return;
        };

        // The data dir may not exist yet on a first run
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let written = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| file.write_all(crash_report(info).as_bytes()));
        if written.is_ok() {
            eprintln!("\nCrash logged to: {}", path.display());
        }

        default_hook(info);
    }));
}

/// Routes tracing output for client commands to ~/.sartthi/logs/sartthi.log.
///
/// Stdout stays free for command output. RUST_LOG overrides the default
/// `info` level.
fn init_file_logging(command: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&logs_dir, "sartthi.log"));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(writer)
        .with_ansi(false) // plain text in log files
        .with_target(true)
        .with_line_number(true)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), command, "sartthi starting");
    Some(guard)
}

fn main() -> Result<()> {
    install_crash_handler();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve {
            port,
            admin_token,
            no_seed,
        } => {
            let port = port.unwrap_or(config.server.port);
            let admin_token = admin_token.or_else(|| config.server.admin_token.clone());
            let seed = config.server.seed && !no_seed;
            run_server_foreground(port, admin_token, seed)
        }
        command => {
            // Dropping the guard flushes the log file
            let _log_guard = init_file_logging(command_name(&command));
            match command {
                Commands::Login { token, admin } => handle_login(token, admin),
                Commands::Logout => handle_logout(),
                Commands::Docs { command } => handle_docs(command, &config),
                Commands::Store { command } => handle_store(command),
                Commands::Serve { .. } => unreachable!("handled above"),
            }
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Serve { .. } => "serve",
        Commands::Login { .. } => "login",
        Commands::Logout => "logout",
        Commands::Docs { .. } => "docs",
        Commands::Store { .. } => "store",
    }
}

#[tokio::main]
async fn run_server_foreground(port: u16, admin_token: Option<String>, seed: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let docs = DocsRepository::new();
    if seed {
        docs.seed_defaults().await?;
    }

    if admin_token.is_none() {
        tracing::warn!("No admin token configured; admin routes accept any bearer token");
    }

    let app = api::create_router(ApiState::new(docs, admin_token));
    let addr = format!("0.0.0.0:{port}");

    tracing::info!("Starting documentation server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn handle_login(token: String, admin: bool) -> Result<()> {
    ensure_sartthi_dir_exists()?;
    let mut session = Session::load()?;
    session.sign_in(token, admin);
    session.save()?;

    println!("✓ Token saved{}", if admin { " (admin)" } else { "" });
    Ok(())
}

fn handle_logout() -> Result<()> {
    let mut session = Session::load()?;
    session.sign_out();
    session.save()?;

    println!("✓ Signed out");
    Ok(())
}

#[tokio::main]
async fn handle_docs(command: DocsCommand, config: &Config) -> Result<()> {
    let session = Session::load()?;
    let client = DocsClient::new(&config.api_base_url, config.request_timeout())?
        .with_token(session.bearer().map(str::to_string));
    let store = StoreHandle::spawn(
        Store::default(),
        StoreOptions {
            toast_duration: config.toast_duration(),
        },
    );

    tracing::info!(base_url = %client.base_url(), command = ?command, "Running docs command");

    match command {
        DocsCommand::List { category, all } => {
            let result = if all {
                client.admin_list(category.as_deref()).await
            } else {
                client.list(category.as_deref()).await
            };
            if let Some(docs) = store.report(result).await {
                print_doc_list(&docs);
            }
        }
        DocsCommand::Show { slug } => {
            if let Some(doc) = store.report(client.get(&slug).await).await {
                print_doc(&doc);
            }
        }
        DocsCommand::Create { fields } => {
            let article = new_article(fields)?;
            if let Some(doc) = store.report(client.create(article).await).await {
                store
                    .toast(format!("Created '{}' ({})", doc.title, doc.id), ToastKind::Success)
                    .await?;
            }
        }
        DocsCommand::Update { id, fields } => {
            let update = article_update(fields)?;
            if let Some(doc) = store.report(client.update(&id, update).await).await {
                store
                    .toast(format!("Updated '{}'", doc.title), ToastKind::Success)
                    .await?;
            }
        }
        DocsCommand::Delete { id } => {
            if let Some(message) = store.report(client.delete(&id).await).await {
                store.toast(message, ToastKind::Success).await?;
            }
        }
    }

    let state = store.state();
    if print_toasts(&state) {
        bail!("Documentation command failed");
    }
    Ok(())
}

fn read_content(fields: &ArticleFields) -> Result<Option<String>> {
    match (&fields.content, &fields.content_file) {
        (Some(content), _) => Ok(Some(content.clone())),
        (None, Some(path)) => fs::read_to_string(path)
            .map(Some)
            .map_err(|e| anyhow!("Could not read {}: {}", path.display(), e)),
        (None, None) => Ok(None),
    }
}

fn new_article(fields: ArticleFields) -> Result<NewDocArticle> {
    let content = read_content(&fields)?.unwrap_or_default();
    Ok(NewDocArticle {
        title: fields.title.unwrap_or_default(),
        slug: fields.slug.unwrap_or_default(),
        content,
        category: fields.category.unwrap_or_default(),
        subcategory: fields.subcategory,
        video_url: fields.video_url,
        order: fields.order.unwrap_or(0),
        is_published: fields.published.unwrap_or(false),
    })
}

fn article_update(fields: ArticleFields) -> Result<DocArticleUpdate> {
    let content = read_content(&fields)?;
    Ok(DocArticleUpdate {
        title: fields.title,
        slug: fields.slug,
        content,
        category: fields.category,
        subcategory: fields.subcategory,
        video_url: fields.video_url,
        order: fields.order,
        is_published: fields.published,
    })
}

fn print_doc_list(docs: &[DocArticle]) {
    if docs.is_empty() {
        println!("No articles found.");
        return;
    }

    for (category, articles) in group_by_category(docs) {
        println!("{}", category);
        for doc in articles {
            let draft = if doc.is_published { "" } else { " [draft]" };
            println!("  {:>3}  {:<32} {}{}", doc.order, doc.slug, doc.title, draft);
        }
    }
}

fn print_doc(doc: &DocArticle) {
    println!("{}", doc.title);
    println!("{}", "=".repeat(doc.title.chars().count()));
    match &doc.subcategory {
        Some(sub) => println!("{} / {}", doc.category, sub),
        None => println!("{}", doc.category),
    }
    if let Some(video) = &doc.video_url {
        println!("Video: {}", video);
    }
    println!("Updated: {}\n", doc.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    println!("{}", doc.content);
}

/// Prints pending toasts. Returns true if any of them reports an error.
fn print_toasts(state: &AppState) -> bool {
    let mut failed = false;
    for toast in state.toasts.iter() {
        match toast.kind {
            ToastKind::Error => {
                failed = true;
                eprintln!("✗ {}", toast.message);
            }
            ToastKind::Warning => {
                failed = true;
                eprintln!("! {}", toast.message);
            }
            ToastKind::Success => println!("✓ {}", toast.message),
            ToastKind::Info => println!("{}", toast.message),
        }
    }
    failed
}

fn handle_store(command: StoreCommand) -> Result<()> {
    match command {
        StoreCommand::Replay {
            file,
            demo,
            summary,
        } => {
            let json = read_input(&file)?;
            let actions = parse_actions(&json)?;

            let initial = if demo {
                AppState::with_demo_data()
            } else {
                AppState::default()
            };
            let mut store = Store::new(initial);
            let count = actions.len();
            for action in actions {
                store.dispatch(action);
            }
            tracing::info!(count, "Replayed actions");

            if summary {
                print_summary(store.state());
            } else {
                println!("{}", serde_json::to_string_pretty(store.state())?);
            }
            Ok(())
        }
    }
}

fn print_summary(state: &AppState) {
    let scope = if state.current_section.is_workspace_scoped() {
        format!(" in {}", state.current_workspace)
    } else {
        String::new()
    };
    println!("Section: {}{}", state.current_section, scope);

    let open: Vec<&str> = state.modals.open_modals().iter().map(|m| m.as_str()).collect();
    if open.is_empty() {
        println!("Open modals: none");
    } else {
        println!("Open modals: {}", open.join(", "));
    }

    match state.find_project(&state.current_project) {
        Some(project) => println!(
            "Project: {} ({})",
            project.name,
            project.client.as_deref().unwrap_or("no client")
        ),
        None => println!("Project: {} (not loaded)", state.current_project),
    }
    for task in state.current_project_tasks() {
        println!("  - {} [{}]", task.title, task.status.as_deref().unwrap_or("-"));
    }
    println!("Toasts: {}", state.toasts.len());
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))
    }
}
