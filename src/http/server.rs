use log::info;
use rouille::{Request, Response};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    config::{HttpConfig, Limits},
    domain::window::TimeWindow,
    engine::error::EngineError,
    http::error::ApiError,
    upstream::{MusicApi, session::Session},
    views,
};

pub struct HttpServer<A> {
    session: Arc<Session<A>>,
    limits: Limits,
    pub config: HttpConfig,
}

impl<A: MusicApi + 'static> HttpServer<A> {
    pub fn new(session: Session<A>, limits: Limits, config: HttpConfig) -> Self {
        Self {
            session: Arc::new(session),
            limits,
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let session = self.session.as_ref();
        let limits = &self.limits;

        let response = rouille::router!(request,
            (GET) (/profile) => {
                Response::json(&views::profile::profile(session))
            },
            (GET) (/top/{window: String}) => {
                Self::respond(Self::parse_window(&window).and_then(|window| {
                    views::charts::top_charts(session, window, limits)
                }))
            },
            (GET) (/features/{window: String}) => {
                Self::respond(Self::parse_window(&window).and_then(|window| {
                    views::audio::audio_features(session, window, limits)
                }))
            },
            (GET) (/patterns) => {
                Self::respond(views::patterns::listening_patterns(session, limits))
            },
            (GET) (/playlists) => {
                Self::respond(views::playlists::playlists(session))
            },
            (GET) (/playlists/{id: String}) => {
                let search = request.get_param("q").unwrap_or_default();
                Self::respond(views::playlists::playlist_analysis(session, &id, &search))
            },
            _ => Response::empty_404()
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn parse_window(token: &str) -> Result<TimeWindow, EngineError> {
        token.parse()
    }

    fn respond<T: Serialize>(result: Result<T, EngineError>) -> Response {
        match result {
            Ok(view) => Response::json(&view),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}
