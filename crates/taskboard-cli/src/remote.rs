use std::time::Duration;

use anyhow::{
  Context,
  bail
};
use serde::de::DeserializeOwned;
use taskboard_core::{
  Endpoints,
  NewTask,
  Task,
  TaskApi,
  TaskId
};
use tracing::{
  debug,
  warn
};

/// `TaskApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
  client:    reqwest::Client,
  endpoints: Endpoints
}

impl HttpApi {
  pub fn new(
    base_url: &str,
    timeout: Option<Duration>
  ) -> anyhow::Result<Self> {
    let mut builder =
      reqwest::Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().context(
      "failed building HTTP client for \
       the task API"
    )?;

    Ok(Self {
      client,
      endpoints: Endpoints::new(base_url)
    })
  }

  pub fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }

  async fn send(
    &self,
    request: reqwest::RequestBuilder
  ) -> anyhow::Result<String> {
    let request = request
      .header(
        reqwest::header::ACCEPT,
        "application/json"
      )
      .build()
      .context(
        "failed building task API \
         request"
      )?;
    let method = request.method().clone();
    let url = request.url().to_string();
    debug!(%method, %url, "task API request");

    let response = self
      .client
      .execute(request)
      .await
      .with_context(|| {
        format!("{method} {url} failed")
      })?;

    let status = response.status();
    let body =
      response.text().await.with_context(
        || {
          format!(
            "failed reading response \
             body from {method} {url}"
          )
        }
      )?;

    if !status.is_success() {
      warn!(
        %method,
        %url,
        status = status.as_u16(),
        "task API returned an error \
         status"
      );
      bail!(
        "{method} {url} returned HTTP \
         {status}: {}",
        snippet(&body)
      );
    }

    Ok(body)
  }

  async fn send_json<T>(
    &self,
    request: reqwest::RequestBuilder
  ) -> anyhow::Result<T>
  where
    T: DeserializeOwned
  {
    let body = self.send(request).await?;
    serde_json::from_str(&body).context(
      "failed decoding task API \
       response"
    )
  }

  fn with_json_body<B>(
    request: reqwest::RequestBuilder,
    body: &B
  ) -> anyhow::Result<
    reqwest::RequestBuilder
  >
  where
    B: serde::Serialize + ?Sized
  {
    let json = serde_json::to_string(body)
      .context(
        "failed encoding request body"
      )?;
    Ok(
      request
        .header(
          reqwest::header::CONTENT_TYPE,
          "application/json"
        )
        .body(json)
    )
  }
}

impl TaskApi for HttpApi {
  async fn list(
    &self
  ) -> anyhow::Result<Vec<Task>> {
    let request = self
      .client
      .get(self.endpoints.collection());
    self.send_json(request).await
  }

  async fn create(
    &self,
    draft: &NewTask
  ) -> anyhow::Result<Task> {
    let request = Self::with_json_body(
      self
        .client
        .post(self.endpoints.collection()),
      draft
    )?;
    self.send_json(request).await
  }

  async fn update(
    &self,
    task: &Task
  ) -> anyhow::Result<Task> {
    let request = Self::with_json_body(
      self
        .client
        .put(self.endpoints.item(task.id)),
      task
    )?;
    self.send_json(request).await
  }

  async fn delete(
    &self,
    id: TaskId
  ) -> anyhow::Result<()> {
    let request = self
      .client
      .delete(self.endpoints.item(id));
    self.send(request).await?;
    Ok(())
  }
}

fn snippet(body: &str) -> String {
  const LIMIT: usize = 200;
  let body = body.trim();
  if body.chars().count() <= LIMIT {
    return body.to_string();
  }
  let mut cut: String =
    body.chars().take(LIMIT).collect();
  cut.push('…');
  cut
}
