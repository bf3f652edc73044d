pub mod core;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::dispatch::MainLoop;
use crate::core::error::ShellResult;
use crate::core::init::SubsystemEntry;
use crate::core::state::{Application, Collaborators, ShellConfig};

/// Install the fmt subscriber. Later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mapshell_lib=debug")),
        )
        .try_init();
}

/// Bring the shell up: logging, config, settings dir, then native
/// platform and framework init with `framework_steps` after the built-ins.
///
/// A storage problem leaves the application running with the engine inert
/// (check `are_platform_and_core_initialized`); any other init failure is
/// returned. The host drives the returned `MainLoop` on its main thread.
pub fn run(
    config_path: &Path,
    collaborators: Collaborators,
    framework_steps: Vec<SubsystemEntry>,
) -> ShellResult<(Application, MainLoop)> {
    init_tracing();

    let config = ShellConfig::load_or_default(config_path);
    tracing::info!(
        "Map shell starting ({} / {})...",
        config.flavor,
        config.build_type
    );

    let (mut app, main_loop) = Application::on_create(config, collaborators)?;
    for step in framework_steps {
        app.add_framework_step(step);
    }
    app.start()?;

    Ok((app, main_loop))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::init::InitContext;
    use crate::core::native::TaskHandle;
    use crate::core::testing::{
        FakeDownloads, NativeCall, RecordingBridge, RecordingNotifier, RootedResolver,
    };

    #[tokio::test]
    async fn run_brings_the_engine_up_and_serves_tasks() {
        let root = tempfile::tempdir().unwrap();
        let bridge = Arc::new(RecordingBridge::default());

        let (app, main_loop) = run(
            &root.path().join("shell.json"),
            Collaborators {
                bridge: bridge.clone(),
                downloads: Arc::new(FakeDownloads::new(false)),
                notifier: Arc::new(RecordingNotifier::default()),
                resolver: Some(Box::new(RootedResolver {
                    root: root.path().to_path_buf(),
                })),
            },
            vec![SubsystemEntry::new(
                "search",
                |ctx: &mut InitContext<'_>| -> ShellResult<()> {
                    ctx.bridge.add_localization("search_ready", "yes");
                    Ok(())
                },
            )],
        )
        .unwrap();

        assert!(app.are_platform_and_core_initialized());

        let dispatcher = app.dispatcher();
        let native = std::thread::spawn(move || {
            dispatcher.forward(TaskHandle(42)).unwrap();
        });
        native.join().unwrap();
        drop(app);

        assert_eq!(main_loop.run().await, 1);
        assert!(bridge.calls().contains(&NativeCall::ProcessTask(TaskHandle(42))));
        assert!(bridge
            .calls()
            .contains(&NativeCall::AddLocalization("search_ready".into(), "yes".into())));
    }
}
