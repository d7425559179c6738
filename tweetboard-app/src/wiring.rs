use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tweetboard_config::{Backend, BoardConfig};
use tweetboard_page::{PageBootstrap, PageIds};
use tweetboard_service::{
    ComposeBox, HttpTweetService, LocalTweetService, TweetApi, TweetService, TweetStore,
};
use tweetboard_tui::{TuiActor, TuiDocument, TuiErrorSink, TuiHandle, TuiMsg, spawn_tui_feeders};

/// Everything a host needs to run one page.
pub struct Wiring {
    pub service: Arc<dyn TweetService>,
    pub compose: ComposeBox,
    pub ids: PageIds,
}

impl Wiring {
    pub fn from_config(cfg: &BoardConfig) -> Result<Self> {
        let compose = ComposeBox::new(cfg.compose.author.clone());
        let service: Arc<dyn TweetService> = match cfg.service.backend {
            Backend::Http => {
                let api = TweetApi::new(&cfg.service.base_url)?.with_timeout(cfg.service.timeout());
                Arc::new(HttpTweetService::new(api, compose.clone()))
            }
            Backend::Local => Arc::new(LocalTweetService::new(
                Arc::new(TweetStore::seeded()),
                compose.clone(),
            )),
        };
        Ok(Self {
            service,
            compose,
            ids: PageIds {
                container: cfg.page.container_id.clone(),
                send_control: cfg.page.send_control_id.clone(),
            },
        })
    }

    pub async fn run_tui(self) -> Result<()> {
        let shutdown = CancellationToken::new();
        let (ui, inbox) = TuiHandle::channel();
        let document = Arc::new(TuiDocument::new(self.ids.clone(), ui.clone()));

        let actor = TuiActor::new(
            inbox,
            ui.clone(),
            self.compose,
            document.send_button(),
            self.ids.clone(),
            shutdown.clone(),
        )?;
        spawn_tui_feeders(ui.clone(), shutdown.clone());
        let ui_task = tokio::spawn(actor.run());

        let bootstrap = PageBootstrap::new(
            self.service,
            document,
            Arc::new(TuiErrorSink::new(ui.clone())),
        )
        .with_ids(self.ids);

        tokio::select! {
            state = bootstrap.load() => {
                ui.send(TuiMsg::Page(state));
            }
            _ = shutdown.cancelled() => {}
        }

        ui_task.await?
    }
}
