//! Subcommand handlers for run and config actions.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::args::ConfigAction;
use crate::config::{default_path as get_config_path, Config, ConfigError, DEFAULT_CONFIG_TEMPLATE};
use crate::event::PageEvent;
use crate::fixture::{FixtureError, PageFixture};
use crate::page::{Page, PageError};
use crate::script::{Script, ScriptError};
use crate::transport::{FormResponse, FormTransport, HttpTransport, TransportError};

/// Longest single sleep in realtime mode, so Ctrl+C is noticed promptly.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Options for [`run_page`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub page: PathBuf,
    pub script: Option<PathBuf>,
    pub until: Option<Duration>,
    pub realtime: bool,
    pub base_url: Option<String>,
    pub config: Option<PathBuf>,
}

/// Build the page from its fixture, replay the script and print the final
/// document.
pub async fn run_page(options: RunOptions) -> Result<(), RunError> {
    let config = Config::load(options.config.as_deref())?;

    let mut transport = HttpTransport::with_timeout(config.contact.timeout())?;
    if let Some(base_url) = &options.base_url {
        transport = transport.with_base_url(base_url)?;
    }

    let mut page = load_page(&options.page, &config, transport)?;
    let script = match &options.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    let steps = script.resolve(page.document())?;
    let end = options.until.unwrap_or_else(|| script.end());
    log::info!(
        "Replaying {} step(s) until {} ms",
        steps.len(),
        end.as_millis()
    );

    if options.realtime {
        let stop = Arc::new(AtomicBool::new(false));
        let handler_stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            handler_stop.store(true, Ordering::SeqCst);
            eprintln!("\nReceived Ctrl+C, stopping...");
        })?;
        run_realtime(&mut page, steps, end, &stop).await;
    } else {
        page.run_script(&steps).await;
        page.advance_to(end.max(page.now()));
    }

    println!("t = {} ms", page.now().as_millis());
    print!("{}", page.document());
    Ok(())
}

/// Load a fixture and initialize every component on it.
pub fn load_page<T: FormTransport>(
    path: &Path,
    config: &Config,
    transport: T,
) -> Result<Page<T>, RunError> {
    let document = PageFixture::load(path)?.into_document()?;
    Ok(Page::init(document, config, transport)?)
}

/// A contact form request running while the page keeps ticking.
type InFlight = Pin<Box<dyn Future<Output = Result<FormResponse, TransportError>>>>;

enum Wake {
    Deadline,
    Response(Result<FormResponse, TransportError>),
    Stopped,
}

/// Replay `steps` against the wall clock, firing timers as they come due,
/// and stop at `end` or as soon as `stop` is set.
///
/// A contact form request runs alongside timers and later steps. Its outcome
/// is applied at the wall time it arrives, so the status clear delay counts
/// from the response. A request still in flight at `end` is waited for.
pub async fn run_realtime<T>(
    page: &mut Page<T>,
    steps: Vec<(Duration, PageEvent)>,
    end: Duration,
    stop: &AtomicBool,
) where
    T: FormTransport + Clone + 'static,
{
    let started = tokio::time::Instant::now();
    let mut steps = steps.into_iter().peekable();
    let mut in_flight: Option<InFlight> = None;

    loop {
        let upcoming = steps
            .peek()
            .map(|(at, _)| *at)
            .into_iter()
            .chain(page.next_due().filter(|due| *due <= end))
            .min();
        let next = match upcoming {
            Some(at) => at,
            None if page.now() < end => end,
            None if in_flight.is_none() => break,
            None => page.now() + STOP_POLL_INTERVAL,
        };

        match wait_until(started + next, stop, &mut in_flight).await {
            Wake::Stopped => return,
            Wake::Response(result) => {
                page.advance_to(started.elapsed());
                page.finish_submission(result);
                continue;
            }
            Wake::Deadline => {}
        }

        page.advance_to(next);
        while let Some((_, event)) = steps.next_if(|(at, _)| *at <= next) {
            log::info!("[{} ms] {}", next.as_millis(), event.name());
            match event {
                PageEvent::Submit(form) => {
                    if let Some(submission) = page.begin_submission(form) {
                        let transport = page.transport().clone();
                        in_flight =
                            Some(Box::pin(async move { transport.send(&submission).await }));
                    }
                }
                event => page.dispatch(event).await,
            }
        }
    }
}

/// Sleep until `deadline` in short naps, returning early for Ctrl+C or when
/// the in-flight request completes.
async fn wait_until(
    deadline: tokio::time::Instant,
    stop: &AtomicBool,
    in_flight: &mut Option<InFlight>,
) -> Wake {
    loop {
        if stop.load(Ordering::SeqCst) {
            return Wake::Stopped;
        }
        let now = tokio::time::Instant::now();
        if now >= deadline {
            return Wake::Deadline;
        }
        let nap = tokio::time::sleep((deadline - now).min(STOP_POLL_INTERVAL));

        let response = match in_flight.as_mut() {
            Some(request) => tokio::select! {
                result = request => Some(result),
                _ = nap => None,
            },
            None => {
                nap.await;
                None
            }
        };
        if let Some(result) = response {
            *in_flight = None;
            return Wake::Response(result);
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction) {
    match action {
        ConfigAction::Show { config } => {
            let cfg = match Config::load(config.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            println!("Current configuration:");
            println!(
                "  Preloader: {} (fade after {} ms)",
                cfg.preloader.selector, cfg.preloader.delay_ms
            );
            println!("  Nav offset: {} px", cfg.scroll.nav_offset);
            println!("  Reveal threshold: {}", cfg.reveal.threshold);
            println!(
                "  Typewriter: typing {} ms, deleting {} ms, pause {} ms",
                cfg.typewriter.typing_ms, cfg.typewriter.deleting_ms, cfg.typewriter.pause_ms
            );
            println!(
                "  Contact form: {} (status cleared after {} ms)",
                cfg.contact.form_selector, cfg.contact.clear_after_ms
            );
            println!("  Back-to-top threshold: {} px", cfg.back_to_top.threshold);
            println!();

            let config_path = config.unwrap_or_else(get_config_path);
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            let config_path = get_config_path();

            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'portfolio-ui config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{FormResponse, FormSubmission};
    use std::io::Write;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone)]
    struct Offline;

    impl FormTransport for Offline {
        async fn send(&self, _: &FormSubmission) -> Result<FormResponse, TransportError> {
            Err(TransportError::InvalidUrl("offline".into()))
        }
    }

    fn fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[element]]
            tag = "div"
            id = "preloader"

            [[element]]
            tag = "button"
            id = "back-to-top"
            "#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_load_page_enables_present_components() {
        let file = fixture();
        let page = load_page(file.path(), &Config::default(), Offline).unwrap();
        let enabled: Vec<_> = page
            .components()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(enabled, vec!["preloader", "back-to-top"]);
    }

    #[test]
    fn test_load_page_missing_fixture() {
        let result = load_page(
            Path::new("/nonexistent/page.toml"),
            &Config::default(),
            Offline,
        );
        assert!(matches!(
            result,
            Err(RunError::Fixture(FixtureError::IoError { .. }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_runs_timers_until_end() {
        let file = fixture();
        let mut page = load_page(file.path(), &Config::default(), Offline).unwrap();
        let stop = AtomicBool::new(false);

        run_realtime(
            &mut page,
            vec![(Duration::ZERO, PageEvent::Load)],
            Duration::from_millis(1500),
            &stop,
        )
        .await;

        let preloader = page.document().get_element_by_id("preloader").unwrap();
        assert_eq!(page.document().style(preloader, "display"), Some("none"));
        assert_eq!(page.now(), Duration::from_millis(1500));
    }

    /// Answers every submission with a 200 after `latency` of wall time.
    #[derive(Clone, Default)]
    struct Slow {
        latency: Duration,
        sent: Arc<AtomicUsize>,
    }

    impl FormTransport for Slow {
        async fn send(&self, _: &FormSubmission) -> Result<FormResponse, TransportError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            Ok(FormResponse {
                status: 200,
                body: "{}".to_string(),
            })
        }
    }

    fn contact_fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
            [[element]]
            tag = "div"
            id = "preloader"

            [[element]]
            tag = "form"
            id = "contact-form"
            attributes = {{ action = "https://forms.example.com/f", method = "POST" }}

            [[element]]
            tag = "input"
            parent = "contact-form"
            attributes = {{ name = "email" }}
            value = "ada@example.com"

            [[element]]
            tag = "p"
            id = "form-status"
            "##
        )
        .unwrap();
        file
    }

    fn slow_page(latency: Duration) -> (tempfile::NamedTempFile, Page<Slow>) {
        let file = contact_fixture();
        let transport = Slow {
            latency,
            ..Slow::default()
        };
        let page = load_page(file.path(), &Config::default(), transport).unwrap();
        (file, page)
    }

    fn status(page: &Page<Slow>) -> &str {
        page.contact().unwrap().status_text(page.document())
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_status_clear_counts_from_response() {
        let (_file, mut page) = slow_page(Duration::from_secs(3));
        let form = page.document().get_element_by_id("contact-form").unwrap();
        let stop = AtomicBool::new(false);

        run_realtime(
            &mut page,
            vec![(Duration::ZERO, PageEvent::Submit(form))],
            Duration::from_millis(8999),
            &stop,
        )
        .await;

        // Response at 3000 ms, so the status holds until 9000 ms.
        assert_eq!(page.now(), Duration::from_millis(8999));
        assert_eq!(
            status(&page),
            "Thanks for your message! I'll get back to you soon."
        );
        page.advance_to(Duration::from_millis(9000));
        assert_eq!(status(&page), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_timers_run_while_request_in_flight() {
        let (_file, mut page) = slow_page(Duration::from_secs(3));
        let form = page.document().get_element_by_id("contact-form").unwrap();
        let stop = Arc::new(AtomicBool::new(false));
        let stopper = Arc::clone(&stop);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            stopper.store(true, Ordering::SeqCst);
        });

        run_realtime(
            &mut page,
            vec![
                (Duration::ZERO, PageEvent::Submit(form)),
                (Duration::ZERO, PageEvent::Load),
            ],
            Duration::from_secs(10),
            &stop,
        )
        .await;

        // Stopped at 2 s: the preloader finished, the request did not.
        let preloader = page.document().get_element_by_id("preloader").unwrap();
        assert_eq!(page.document().style(preloader, "display"), Some("none"));
        assert!(page.contact().unwrap().is_pending());
        assert_eq!(status(&page), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_ignores_submit_while_pending() {
        let (_file, mut page) = slow_page(Duration::from_secs(3));
        let form = page.document().get_element_by_id("contact-form").unwrap();
        let stop = AtomicBool::new(false);

        run_realtime(
            &mut page,
            vec![
                (Duration::ZERO, PageEvent::Submit(form)),
                (Duration::from_millis(1000), PageEvent::Submit(form)),
            ],
            Duration::from_millis(4000),
            &stop,
        )
        .await;

        assert_eq!(page.transport().sent.load(Ordering::SeqCst), 1);
        assert!(!page.contact().unwrap().is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_waits_for_response_past_end() {
        let (_file, mut page) = slow_page(Duration::from_secs(3));
        let form = page.document().get_element_by_id("contact-form").unwrap();
        let stop = AtomicBool::new(false);

        run_realtime(
            &mut page,
            vec![(Duration::ZERO, PageEvent::Submit(form))],
            Duration::from_millis(1000),
            &stop,
        )
        .await;

        assert!(!page.contact().unwrap().is_pending());
        assert!(page.now() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_stops_when_flag_set() {
        let file = fixture();
        let mut page = load_page(file.path(), &Config::default(), Offline).unwrap();
        let stop = AtomicBool::new(true);

        run_realtime(
            &mut page,
            vec![(Duration::ZERO, PageEvent::Load)],
            Duration::from_secs(10),
            &stop,
        )
        .await;
        assert_eq!(page.now(), Duration::ZERO);
        assert_eq!(page.pending_timers(), 0);
    }
}
