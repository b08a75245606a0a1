#![cfg(feature = "tracing")]

use std::{
    io,
    sync::{Arc, Mutex},
};
use tracing_subscriber::{filter::LevelFilter, util::SubscriberInitExt};
use waymark::{LoggingHook, Router};

mod common;
use common::{TestRequest, TestResponse, reply};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_dispatch_and_hook_emit_events() {
    let captured = Captured::default();
    let writer = captured.clone();
    let _guard = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
        .set_default();

    let mut router = Router::<TestRequest, TestResponse>::new();
    router.add_start(LoggingHook::named("api"));
    router.get("/users/:id", reply("ok")).unwrap();

    router
        .dispatch("/users/7", &TestRequest::new("get"), TestResponse::new())
        .unwrap();
    let _ = router.dispatch("/nowhere", &TestRequest::new("get"), TestResponse::new());

    let text = captured.text();
    assert!(text.contains("registered route"), "{text}");
    assert!(text.contains("route matched"), "{text}");
    assert!(text.contains("processing request"), "{text}");
    assert!(text.contains("api"), "{text}");
    assert!(text.contains("no route matched"), "{text}");
}
