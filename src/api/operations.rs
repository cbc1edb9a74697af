use crate::api::events_api::EventsApi;
use crate::calendar::Event;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastStatus {
    Success,
    Error,
    Info,
}

/// Transient user-facing message surfaced by the alert collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub status: ToastStatus,
}

/// Holds the in-memory event list and runs fetch/save/delete against the
/// events endpoint. Failures are caught here: logged, turned into an error
/// toast, and never allowed to corrupt the held events beyond the failed
/// operation.
pub struct EventOperations {
    api: EventsApi,
    events: Vec<Event>,
    toasts: Vec<Toast>,
}

impl EventOperations {
    pub fn new(api: EventsApi) -> Self {
        Self { api, events: Vec::new(), toasts: Vec::new() }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Hands the queued toasts to the display collaborator.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub async fn fetch_events(&mut self) {
        match self.api.fetch_events().await {
            Ok(events) => {
                self.events = events;
                self.push_toast("일정 로딩 완료!", ToastStatus::Info);
            }
            Err(err) => {
                tracing::error!("Error fetching events: {err}");
                self.push_toast("이벤트 로딩 실패", ToastStatus::Error);
            }
        }
    }

    /// Creates or updates depending on `editing`. The held list is patched
    /// from the server's response on success.
    pub async fn save_event(&mut self, event: Event, editing: bool) {
        if editing {
            match self.api.update_event(&event).await {
                Ok(updated) => {
                    if let Some(held) = self.events.iter_mut().find(|e| e.id == updated.id) {
                        *held = updated;
                    }
                    self.push_toast("일정이 수정되었습니다.", ToastStatus::Success);
                }
                Err(err) => {
                    tracing::error!("Error saving event: {err}");
                    self.push_toast("일정 저장 실패", ToastStatus::Error);
                }
            }
        } else {
            match self.api.create_event(&event).await {
                Ok(created) => {
                    self.events.push(created);
                    self.push_toast("일정이 추가되었습니다.", ToastStatus::Success);
                }
                Err(err) => {
                    tracing::error!("Error saving event: {err}");
                    self.push_toast("일정 저장 실패", ToastStatus::Error);
                }
            }
        }
    }

    pub async fn delete_event(&mut self, event_id: &str) {
        match self.api.delete_event(event_id).await {
            Ok(()) => {
                self.events.retain(|e| e.id != event_id);
                self.push_toast("일정이 삭제되었습니다.", ToastStatus::Info);
            }
            Err(err) => {
                tracing::error!("Error deleting event: {err}");
                self.push_toast("일정 삭제 실패", ToastStatus::Error);
            }
        }
    }

    fn push_toast(&mut self, title: &str, status: ToastStatus) {
        self.toasts.push(Toast { title: title.to_string(), status });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_json(id: &str, title: &str, date: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "date": date,
            "startTime": "09:00",
            "endTime": "10:00",
            "description": "기존 팀 미팅",
            "location": "회의실 B",
            "category": "업무",
            "repeat": { "type": "none", "interval": 0 },
            "notificationTime": 10
        })
    }

    fn event(id: &str, title: &str, date: &str) -> Event {
        serde_json::from_value(event_json(id, title, date)).unwrap()
    }

    fn ops_against(server: &MockServer) -> EventOperations {
        EventOperations::new(EventsApi::new(server.uri()))
    }

    #[tokio::test]
    async fn fetch_loads_the_stored_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [event_json("1", "기존 회의", "2025-10-15")]
            })))
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        assert!(ops.events().is_empty());

        ops.fetch_events().await;

        assert_eq!(ops.events().len(), 1);
        assert_eq!(ops.events()[0].id, "1");
        assert_eq!(
            ops.take_toasts(),
            vec![Toast { title: "일정 로딩 완료!".to_string(), status: ToastStatus::Info }]
        );
    }

    #[tokio::test]
    async fn failed_fetch_keeps_held_events_and_raises_an_error_toast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        ops.events.push(event("1", "기존 회의", "2025-10-15"));

        ops.fetch_events().await;

        assert_eq!(ops.events().len(), 1);
        assert_eq!(
            ops.take_toasts(),
            vec![Toast { title: "이벤트 로딩 실패".to_string(), status: ToastStatus::Error }]
        );
    }

    #[tokio::test]
    async fn saving_a_new_event_appends_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/events"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(event_json("1", "새 회의", "2025-10-16")),
            )
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        ops.save_event(event("", "새 회의", "2025-10-16"), false).await;

        assert_eq!(ops.events().len(), 1);
        assert_eq!(ops.events()[0].title, "새 회의");
        assert_eq!(
            ops.take_toasts(),
            vec![Toast { title: "일정이 추가되었습니다.".to_string(), status: ToastStatus::Success }]
        );
    }

    #[tokio::test]
    async fn saving_an_edited_event_replaces_the_held_copy() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/events/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(event_json("2", "수정된 회의", "2025-10-16")),
            )
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        ops.events.push(event("1", "기존 회의", "2025-10-15"));
        ops.events.push(event("2", "기존 회의2", "2025-10-15"));

        ops.save_event(event("2", "수정된 회의", "2025-10-16"), true).await;

        assert_eq!(ops.events().len(), 2);
        assert_eq!(ops.events()[0].title, "기존 회의");
        assert_eq!(ops.events()[1].title, "수정된 회의");
    }

    #[tokio::test]
    async fn save_failure_leaves_the_held_events_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/events/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        ops.events.push(event("1", "기존 회의", "2025-10-15"));

        ops.save_event(event("9", "유령 회의", "2025-10-16"), true).await;

        assert_eq!(ops.events().len(), 1);
        assert_eq!(ops.events()[0].title, "기존 회의");
        assert_eq!(
            ops.take_toasts(),
            vec![Toast { title: "일정 저장 실패".to_string(), status: ToastStatus::Error }]
        );
    }

    #[tokio::test]
    async fn deleting_an_event_removes_it_from_the_held_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/events/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        ops.events.push(event("1", "삭제할 이벤트", "2025-10-15"));

        ops.delete_event("1").await;

        assert!(ops.events().is_empty());
        assert_eq!(
            ops.take_toasts(),
            vec![Toast { title: "일정이 삭제되었습니다.".to_string(), status: ToastStatus::Info }]
        );
    }

    #[tokio::test]
    async fn delete_failure_keeps_the_event() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/events/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut ops = ops_against(&server);
        ops.events.push(event("1", "삭제할 이벤트", "2025-10-15"));

        ops.delete_event("1").await;

        assert_eq!(ops.events().len(), 1);
        assert_eq!(
            ops.take_toasts(),
            vec![Toast { title: "일정 삭제 실패".to_string(), status: ToastStatus::Error }]
        );
    }
}
