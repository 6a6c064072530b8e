use coderforge_cloud::{CloudData, RESOURCE_PATH, ResourceItem};
use coderforge_provider::{CoderforgeProvider, ConfiguredProvider};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

pub struct TestApi {
    pub server: MockServer,
}

impl TestApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Start a server backed by an in-memory [`FakeApi`].
    pub async fn with_fake() -> (Self, FakeApi) {
        let api = Self::start().await;
        let fake = FakeApi::default();
        Mock::given(path(RESOURCE_PATH))
            .respond_with(fake.clone())
            .mount(&api.server)
            .await;
        (api, fake)
    }

    pub fn provider(&self) -> ConfiguredProvider {
        CoderforgeProvider::new("test")
            .configure(json!({
                "token": TEST_TOKEN,
                "cloud_space": "space-a",
                "stack_id": "stack-1",
                "locations": ["eu-west"],
                "host": self.server.uri()
            }))
            .unwrap()
    }
}

/// Responds with the request envelope, every item stamped with a fixed id.
pub struct EchoWithId(pub &'static str);

impl Respond for EchoWithId {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut envelope: CloudData = serde_json::from_slice(&request.body).unwrap();
        for item in &mut envelope.resource_items {
            item.id = self.0.to_string();
        }
        ResponseTemplate::new(200).set_body_json(envelope)
    }
}

/// Responds with the request envelope unchanged.
pub struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let envelope: CloudData = serde_json::from_slice(&request.body).unwrap();
        ResponseTemplate::new(200).set_body_json(envelope)
    }
}

/// Minimal in-memory implementation of the resource endpoint.
#[derive(Clone, Default)]
pub struct FakeApi {
    items: Arc<Mutex<HashMap<String, ResourceItem>>>,
    next_id: Arc<AtomicUsize>,
}

impl FakeApi {
    #[allow(dead_code)]
    pub fn get(&self, id: &str) -> Option<ResourceItem> {
        self.items.lock().unwrap().get(id).cloned()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

impl Respond for FakeApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut items = self.items.lock().unwrap();
        let resource_id = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "resourceId")
            .map(|(_, value)| value.into_owned());

        match request.method.as_str() {
            "POST" => {
                let mut envelope: CloudData = serde_json::from_slice(&request.body).unwrap();
                for item in &mut envelope.resource_items {
                    let id = format!("r-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
                    item.id = id.clone();
                    items.insert(id, item.clone());
                }
                ResponseTemplate::new(200).set_body_json(envelope)
            }
            "GET" => {
                let mut envelope = CloudData::default();
                if let Some(item) = resource_id.and_then(|id| items.get(&id).cloned()) {
                    envelope.resource_items.push(item);
                }
                ResponseTemplate::new(200).set_body_json(envelope)
            }
            "PUT" => {
                let envelope: CloudData = serde_json::from_slice(&request.body).unwrap();
                for item in &envelope.resource_items {
                    if !items.contains_key(&item.id) {
                        return ResponseTemplate::new(404).set_body_string("resource not found");
                    }
                    items.insert(item.id.clone(), item.clone());
                }
                ResponseTemplate::new(200).set_body_json(envelope)
            }
            "DELETE" => match resource_id.and_then(|id| items.remove(&id)) {
                Some(_) => ResponseTemplate::new(200).set_body_json(CloudData::default()),
                None => ResponseTemplate::new(404).set_body_string("resource not found"),
            },
            _ => ResponseTemplate::new(405),
        }
    }
}
