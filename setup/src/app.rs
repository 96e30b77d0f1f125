use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;

use dictation_application::{
    CreateTrackUseCase, CreateTrackUseCaseImpl, DeleteTrackUseCase, DeleteTrackUseCaseImpl,
    GradeDictationUseCase, GradeDictationUseCaseImpl,
};
use dictation_configuration::AppConfig;
use dictation_domain::{
    AudioCodecPort, AudioStoragePort, CompletionPort, SegmentExtractorPort, TrackRepositoryPort,
};
use dictation_http_server::{create_app_routes, AppState};
use dictation_infra_codec::{CodecConfig, FfmpegCodecAdapter};
use dictation_infra_pcm::WavSegmentExtractor;
use dictation_infra_repository::InMemoryTrackRepository;
use dictation_infra_store::FsAudioStorage;

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run().await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        tracing::info!(
            ffmpeg_path = %config.codec.ffmpeg_path,
            storage_root = %config.storage.root_dir,
            "initializing dictation application"
        );

        let codec: Arc<dyn AudioCodecPort> = Arc::new(FfmpegCodecAdapter::new(CodecConfig {
            ffmpeg_path: PathBuf::from(&config.codec.ffmpeg_path),
        }));
        let extractor: Arc<dyn SegmentExtractorPort> = Arc::new(WavSegmentExtractor::new());
        let storage: Arc<dyn AudioStoragePort> =
            Arc::new(FsAudioStorage::new(&config.storage.root_dir).await?);
        let repository = Arc::new(InMemoryTrackRepository::new());
        let tracks: Arc<dyn TrackRepositoryPort> = repository.clone();
        let completions: Arc<dyn CompletionPort> = repository;

        let create_track: Arc<dyn CreateTrackUseCase> = Arc::new(CreateTrackUseCaseImpl::new(
            codec,
            extractor,
            storage.clone(),
            tracks.clone(),
        ));
        let grade_dictation: Arc<dyn GradeDictationUseCase> =
            Arc::new(GradeDictationUseCaseImpl::new(tracks.clone(), completions));
        let delete_track: Arc<dyn DeleteTrackUseCase> =
            Arc::new(DeleteTrackUseCaseImpl::new(storage, tracks));

        Ok(Self {
            config,
            state: AppState::new(create_track, grade_dictation, delete_track),
        })
    }

    pub async fn run(self) -> Result<(), Error> {
        let address = format!("{}:{}", self.config.server.host, self.config.server.port);
        tracing::info!(address = %address, "starting dictation http server");

        let listener = tokio::net::TcpListener::bind(&address).await?;
        axum::serve(listener, create_app_routes(self.state)).await?;
        Ok(())
    }
}
