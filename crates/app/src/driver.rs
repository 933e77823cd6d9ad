//! Async driver around an editing session
//!
//! Owns the session, the real autosave timer and the save workers. Messages
//! are processed one at a time; saves run on the blocking pool and report
//! back through a channel, so input keeps flowing while a save is in flight.
//! Loads, imports and exports also touch the disk on the blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nitro_ipc::{EditorToUi, UiToEditor};
use raster::{
    EditorSession, GridStore, PixelGrid, SaveJob, SideEffect, StoreError, decode_png,
    export_image,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::bridge::{Action, notification, translate};

type SaveResult = (u64, Result<(), StoreError>);

pub struct EditorDriver {
    session: EditorSession,
    store: Arc<dyn GridStore>,
    /// Armed autosave deadline, mirrored from `ScheduleSave` / `CancelSave`
    deadline: Option<Instant>,
    saves_tx: mpsc::UnboundedSender<SaveResult>,
    saves_rx: mpsc::UnboundedReceiver<SaveResult>,
    in_flight: usize,
    notify: mpsc::UnboundedSender<EditorToUi>,
}

impl EditorDriver {
    pub fn new(
        session: EditorSession,
        store: Arc<dyn GridStore>,
        notify: mpsc::UnboundedSender<EditorToUi>,
    ) -> Self {
        let (saves_tx, saves_rx) = mpsc::unbounded_channel();
        Self {
            session,
            store,
            deadline: None,
            saves_tx,
            saves_rx,
            in_flight: 0,
            notify,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Load `id` from the store into the session
    pub async fn load(&mut self, id: &str) -> Result<(), StoreError> {
        let store = Arc::clone(&self.store);
        let key = id.to_string();
        let loaded = blocking(move || store.load(&key)).await;
        let effects = self.session.finish_load(id, loaded)?;
        if let Some(grid) = self.session.grid() {
            self.send(EditorToUi::Loaded {
                id: id.to_string(),
                width: grid.width(),
                height: grid.height(),
            });
        }
        self.apply(effects);
        Ok(())
    }

    /// Process messages until `inbox` closes, then flush and wait for saves
    pub async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<UiToEditor>) -> EditorSession {
        loop {
            tokio::select! {
                message = inbox.recv() => match message {
                    Some(message) => self.handle_message(message).await,
                    None => break,
                },
                Some((generation, result)) = self.saves_rx.recv() => {
                    self.finish_save(generation, result);
                }
                _ = wait_for(self.deadline) => {
                    self.deadline = None;
                    let now = Instant::now().into_std();
                    if let Some(job) = self.session.poll_autosave(now) {
                        self.spawn_save(job);
                    }
                }
            }
        }

        // Pending edits are written before shutting down
        if let Some(job) = self.session.flush_autosave() {
            self.spawn_save(job);
        }
        while self.in_flight > 0 {
            match self.saves_rx.recv().await {
                Some((generation, result)) => self.finish_save(generation, result),
                None => break,
            }
        }
        self.session
    }

    pub async fn handle_message(&mut self, message: UiToEditor) {
        let Some(action) = translate(message) else {
            return;
        };
        let now = Instant::now().into_std();
        match action {
            Action::Input(event) => {
                let effects = self.session.handle(event, now);
                self.apply(effects);
            }
            Action::Undo => {
                let effects = self.session.undo(now);
                self.apply(effects);
            }
            Action::Redo => {
                let effects = self.session.redo(now);
                self.apply(effects);
            }
            Action::Load(id) => {
                if let Err(e) = self.load(&id).await {
                    self.send(EditorToUi::error("load_failed", e.to_string()));
                }
            }
            Action::Import(path) => {
                if let Err(e) = self.import(path).await {
                    self.send(EditorToUi::error("import_failed", e.to_string()));
                }
            }
            Action::Export(path) => {
                if let Err(e) = self.export(path).await {
                    self.send(EditorToUi::error("export_failed", e.to_string()));
                }
            }
        }
    }

    async fn import(&mut self, path: PathBuf) -> Result<(), StoreError> {
        let grid = blocking(move || read_png(&path)).await?;
        let (width, height) = (grid.width(), grid.height());
        let effects = self.session.import(grid, Instant::now().into_std());
        if let Some(id) = self.session.document_id() {
            self.send(EditorToUi::Loaded {
                id: id.to_string(),
                width,
                height,
            });
        }
        self.apply(effects);
        Ok(())
    }

    async fn export(&self, path: PathBuf) -> Result<(), StoreError> {
        let Some(grid) = self.session.grid().cloned() else {
            return Err(StoreError::Rejected("no image loaded".to_string()));
        };
        let (width, height) = (grid.width(), grid.height());
        let target = path.clone();
        blocking(move || {
            export_image(&grid)
                .save_with_format(&target, image::ImageFormat::Png)
                .map_err(|e| StoreError::Encode(e.to_string()))
        })
        .await?;
        info!("Exported {}x{} image to {}", width, height, path.display());
        Ok(())
    }

    fn apply(&mut self, effects: Vec<SideEffect>) {
        for effect in effects {
            if let Some(message) = notification(&effect) {
                self.send(message);
            }
            match effect {
                SideEffect::ScheduleSave { deadline } => {
                    self.deadline = Some(Instant::from_std(deadline));
                }
                SideEffect::CancelSave => self.deadline = None,
                SideEffect::SaveNow(job) => self.spawn_save(job),
                _ => {}
            }
        }
    }

    fn spawn_save(&mut self, job: SaveJob) {
        debug!("Saving {} (#{})", job.id, job.generation);
        let store = Arc::clone(&self.store);
        let tx = self.saves_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let SaveJob {
                generation,
                id,
                grid,
            } = job;
            let result = blocking(move || store.save(&id, &grid)).await;
            let _ = tx.send((generation, result));
        });
    }

    fn finish_save(&mut self, generation: u64, result: Result<(), StoreError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let effects = self.session.complete_save(generation, result);
        self.apply(effects);
    }

    fn send(&self, message: EditorToUi) {
        if self.notify.send(message).is_err() {
            warn!("UI channel closed, dropping notification");
        }
    }
}

/// Run disk work on the blocking pool; a panicked task reads as a rejection
async fn blocking<T, F>(work: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .unwrap_or_else(|e| Err(StoreError::Rejected(format!("disk task failed: {e}"))))
}

fn read_png(path: &Path) -> Result<PixelGrid, StoreError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Sleep until `deadline`, or forever when no timer is armed
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use nitro_ipc::{EditorCommand, MouseButton, MouseEvent, SaveState};
    use raster::{CellCoord, MemoryStore, Pixel, PixelGrid, Rgb, SessionSettings};

    async fn setup(
        delay: Duration,
    ) -> (
        Arc<MemoryStore>,
        EditorDriver,
        mpsc::UnboundedReceiver<EditorToUi>,
    ) {
        let store = Arc::new(MemoryStore::new());
        store.insert("sprite", PixelGrid::new(8, 8));
        let (notify, notifications) = mpsc::unbounded_channel();
        let session = EditorSession::new(SessionSettings {
            save_delay: delay,
            ..Default::default()
        });
        let mut driver = EditorDriver::new(session, store.clone(), notify);
        driver.load("sprite").await.unwrap();
        (store, driver, notifications)
    }

    fn click(x: f32, y: f32) -> [UiToEditor; 2] {
        [
            UiToEditor::Mouse(MouseEvent::ButtonDown {
                button: MouseButton::Left,
                x,
                y,
            }),
            UiToEditor::Mouse(MouseEvent::ButtonUp {
                button: MouseButton::Left,
                x,
                y,
            }),
        ]
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<EditorToUi>) -> Vec<EditorToUi> {
        let mut out = Vec::new();
        while let Ok(message) = rx.try_recv() {
            out.push(message);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_saves_once() {
        let (store, driver, _notifications) = setup(Duration::from_millis(1000)).await;
        let (tx, inbox) = mpsc::unbounded_channel();
        let task = tokio::spawn(driver.run(inbox));

        for x in 0..5 {
            for message in click(x as f32 + 0.5, 0.5) {
                tx.send(message).unwrap();
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        // Let the debounce window elapse
        tokio::time::sleep(Duration::from_millis(3000)).await;
        drop(tx);
        let session = task.await.unwrap();

        assert_eq!(store.save_count(), 1);
        let saved = store.get("sprite").unwrap();
        assert_eq!(saved.opaque_count(), 5);
        assert_eq!(Some(&saved), session.grid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_edits_save_separately() {
        let (store, driver, _notifications) = setup(Duration::from_millis(100)).await;
        let (tx, inbox) = mpsc::unbounded_channel();
        let task = tokio::spawn(driver.run(inbox));

        for x in 0..3 {
            for message in click(x as f32 + 0.5, 0.5) {
                tx.send(message).unwrap();
            }
            tokio::time::sleep(Duration::from_millis(1000)).await;
        }
        drop(tx);
        task.await.unwrap();
        assert_eq!(store.save_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending_save() {
        let (store, driver, _notifications) = setup(Duration::from_secs(60)).await;
        let (tx, inbox) = mpsc::unbounded_channel();
        let task = tokio::spawn(driver.run(inbox));

        for message in click(2.5, 2.5) {
            tx.send(message).unwrap();
        }
        drop(tx);
        task.await.unwrap();

        assert_eq!(store.save_count(), 1);
        assert_eq!(
            store.get("sprite").unwrap().get(CellCoord::new(2, 2)),
            Some(Pixel::Opaque(Rgb::BLACK))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_reports_and_keeps_edit() {
        let (store, driver, mut notifications) = setup(Duration::ZERO).await;
        store.fail_saves(true);
        let (tx, inbox) = mpsc::unbounded_channel();
        let task = tokio::spawn(driver.run(inbox));

        for message in click(1.5, 1.5) {
            tx.send(message).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(tx);
        let session = task.await.unwrap();

        assert_eq!(session.grid().unwrap().opaque_count(), 1);
        assert!(session.history().can_undo());
        let failed = drain(&mut notifications).into_iter().any(|m| {
            matches!(
                m,
                EditorToUi::SaveStatus {
                    state: SaveState::Failed,
                    ..
                }
            )
        });
        assert!(failed);
        assert_eq!(store.get("sprite").unwrap().opaque_count(), 0);
    }

    #[tokio::test]
    async fn test_load_failure_notifies_error() {
        let (_store, mut driver, mut notifications) = setup(Duration::ZERO).await;
        drain(&mut notifications);

        driver
            .handle_message(UiToEditor::Command(EditorCommand::Load {
                id: "missing".to_string(),
            }))
            .await;
        let messages = drain(&mut notifications);
        assert!(matches!(
            messages.as_slice(),
            [EditorToUi::Error { code, .. }] if code == "load_failed"
        ));
        assert_eq!(driver.session().document_id(), Some("sprite"));
    }

    #[tokio::test]
    async fn test_export_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let (_store, mut driver, _notifications) = setup(Duration::from_secs(60)).await;

        for message in click(0.5, 0.5) {
            driver.handle_message(message).await;
        }
        driver
            .handle_message(UiToEditor::Command(EditorCommand::Export {
                path: path.display().to_string(),
            }))
            .await;
        let exported = image::open(&path).unwrap().to_rgba8();
        assert_eq!(exported.dimensions(), (8, 8));
        assert_eq!(exported.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(exported.get_pixel(1, 0).0[3], 0);

        driver
            .handle_message(UiToEditor::Command(EditorCommand::Undo))
            .await;
        assert_eq!(driver.session().grid().unwrap().opaque_count(), 0);

        driver
            .handle_message(UiToEditor::Command(EditorCommand::Import {
                path: path.display().to_string(),
            }))
            .await;
        assert_eq!(driver.session().grid().unwrap().opaque_count(), 1);
        assert!(!driver.session().history().can_undo());
    }
}
