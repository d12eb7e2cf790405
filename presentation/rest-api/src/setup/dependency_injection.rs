use std::sync::Arc;

use logger::TracingLogger;
use nougat::ocr::NougatOcr;
use openai::chat_model::OpenAIChatModel;
use openai::client::OpenAIClient;
use storage::downloader::HttpPdfDownloader;
use storage::workspace::FilesystemPaperStorage;

use business::application::paper::convert::ConvertPaperUseCaseImpl;
use business::application::pipeline::run::RunPipelineUseCaseImpl;
use business::application::summary::summarize_final::SummarizeFinalUseCaseImpl;
use business::application::summary::summarize_sections::SummarizeSectionsUseCaseImpl;

use crate::api::health::routes::HealthApi;
use crate::api::paper::routes::PaperApi;
use crate::api::pipeline::routes::PipelineApi;
use crate::api::summary::routes::SummaryApi;
use crate::api::ui::UiApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub ui_api: UiApi,
    pub health_api: HealthApi,
    pub paper_api: PaperApi,
    pub summary_api: SummaryApi,
    pub pipeline_api: PipelineApi,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // Infrastructure adapters
        let storage = Arc::new(
            FilesystemPaperStorage::new(
                config.workspace.input_dir.clone(),
                config.workspace.output_dir.clone(),
            )
            .with_retention(config.workspace.max_papers),
        );
        let downloader = Arc::new(HttpPdfDownloader::new(
            config.workspace.download_timeout,
            config.workspace.download_max_bytes,
        ));
        let ocr = Arc::new(NougatOcr::new(
            config.nougat.program.clone(),
            config.nougat.args.clone(),
            config.nougat.timeout,
        ));
        let openai_client = OpenAIClient::new(
            config.openai.api_key.clone(),
            config.openai.base_url.clone(),
            config.openai.timeout,
        );
        let chat_model = Arc::new(OpenAIChatModel::new(
            openai_client,
            config.openai.model.clone(),
            config.openai.temperature,
        ));

        // Paper use cases
        let convert_use_case = Arc::new(ConvertPaperUseCaseImpl {
            storage,
            downloader,
            ocr,
            logger: Arc::new(TracingLogger::new("convert_paper")),
        });

        // Summary use cases
        let summarize_sections_use_case = Arc::new(SummarizeSectionsUseCaseImpl {
            model: chat_model.clone(),
            logger: Arc::new(TracingLogger::new("summarize_sections")),
        });
        let summarize_final_use_case = Arc::new(SummarizeFinalUseCaseImpl {
            model: chat_model,
            logger: Arc::new(TracingLogger::new("summarize_final")),
        });

        // Pipeline use case
        let run_pipeline_use_case = Arc::new(RunPipelineUseCaseImpl {
            convert: convert_use_case.clone(),
            summarize_sections: summarize_sections_use_case.clone(),
            summarize_final: summarize_final_use_case.clone(),
            logger: Arc::new(TracingLogger::new("pipeline")),
        });

        tracing::info!(
            model = %config.openai.model,
            nougat = %config.nougat.program,
            input_dir = %config.workspace.input_dir.display(),
            output_dir = %config.workspace.output_dir.display(),
            "Dependencies wired"
        );

        Ok(Self {
            ui_api: UiApi,
            health_api: HealthApi,
            paper_api: PaperApi::new(convert_use_case),
            summary_api: SummaryApi::new(summarize_sections_use_case, summarize_final_use_case),
            pipeline_api: PipelineApi::new(run_pipeline_use_case),
        })
    }
}
