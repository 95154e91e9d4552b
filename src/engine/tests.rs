// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests {
    use crate::engine::{Engine, SlogEngine};
    use crate::error::BridgeError;
    use crate::handlers::Handler;
    use crate::processors::{self, Processor};
    use crate::record::{Context, LogRecord};
    use crate::severity::{LegacySeverity, Level, StandardSeverity};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Handler that remembers what it saw, shared log included so call order
    /// across handlers can be checked.
    #[derive(Debug)]
    struct RecordingHandler {
        name: String,
        level: StandardSeverity,
        consume: bool,
        fail: bool,
        seen: Arc<Mutex<Vec<(String, LogRecord)>>>,
    }

    impl RecordingHandler {
        fn new(name: &str, seen: &Arc<Mutex<Vec<(String, LogRecord)>>>) -> Self {
            Self {
                name: name.to_string(),
                level: StandardSeverity::Debug,
                consume: false,
                fail: false,
                seen: seen.clone(),
            }
        }
    }

    impl Handler for RecordingHandler {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_handling(&self, level: StandardSeverity) -> bool {
            level >= self.level
        }

        fn handle(&self, record: &LogRecord) -> Result<bool, BridgeError> {
            if self.fail {
                return Err(BridgeError::handler(&self.name, "sink unavailable"));
            }
            self.seen.lock().unwrap().push((self.name.clone(), record.clone()));
            Ok(self.consume)
        }
    }

    fn seen() -> Arc<Mutex<Vec<(String, LogRecord)>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn names(seen: &Arc<Mutex<Vec<(String, LogRecord)>>>) -> Vec<String> {
        seen.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    #[test]
    fn test_handlers_called_in_order() {
        let seen = seen();
        let engine = SlogEngine::new(
            "app",
            vec![
                Arc::new(RecordingHandler::new("first", &seen)),
                Arc::new(RecordingHandler::new("second", &seen)),
            ],
            Vec::new(),
        );

        assert!(engine.info("hello", Context::new()).unwrap());
        assert_eq!(names(&seen), vec!["first", "second"]);

        let (_, record) = &seen.lock().unwrap()[0];
        assert_eq!(record.channel, "app");
        assert_eq!(record.level, StandardSeverity::Info);
        assert_eq!(record.message, "hello");
    }

    #[test]
    fn test_consuming_handler_stops_bubbling() {
        let seen = seen();
        let mut first = RecordingHandler::new("first", &seen);
        first.consume = true;

        let engine = SlogEngine::new(
            "app",
            vec![Arc::new(first), Arc::new(RecordingHandler::new("second", &seen))],
            Vec::new(),
        );

        assert!(engine.error("stop here", Context::new()).unwrap());
        assert_eq!(names(&seen), vec!["first"]);
    }

    #[test]
    fn test_handlers_below_threshold_are_skipped() {
        let seen = seen();
        let mut strict = RecordingHandler::new("strict", &seen);
        strict.level = StandardSeverity::Error;
        strict.consume = true;

        let engine = SlogEngine::new(
            "app",
            vec![Arc::new(strict), Arc::new(RecordingHandler::new("all", &seen))],
            Vec::new(),
        );

        engine.warning("only the lenient one", Context::new()).unwrap();
        assert_eq!(names(&seen), vec!["all"]);
    }

    #[test]
    fn test_rejected_when_no_handler_handles_level() {
        let seen = seen();
        let mut strict = RecordingHandler::new("strict", &seen);
        strict.level = StandardSeverity::Critical;

        let engine = SlogEngine::new("app", vec![Arc::new(strict)], Vec::new());

        assert!(!engine.debug("ignored", Context::new()).unwrap());
        assert!(engine.emergency("accepted", Context::new()).unwrap());
        assert_eq!(names(&seen), vec!["strict"]);

        let empty = SlogEngine::new("app", Vec::new(), Vec::new());
        assert!(!empty.alert("nobody listens", Context::new()).unwrap());
    }

    #[test]
    fn test_processors_run_in_order_before_handlers() {
        let seen = seen();
        let append_a: Processor = Arc::new(|mut r: LogRecord| {
            r.message.push('a');
            r
        });
        let append_b: Processor = Arc::new(|mut r: LogRecord| {
            r.message.push('b');
            r
        });

        let engine = SlogEngine::new(
            "app",
            vec![Arc::new(RecordingHandler::new("h", &seen))],
            vec![processors::placeholders(), append_a, append_b],
        );

        let mut context = Context::new();
        context.insert("who".to_string(), json!("ada"));
        engine.notice("hi {who} ", context).unwrap();

        let (_, record) = &seen.lock().unwrap()[0];
        assert_eq!(record.message, "hi ada ab");
    }

    #[test]
    fn test_legacy_level_resolved_by_engine() {
        let seen = seen();
        let engine = SlogEngine::new(
            "app",
            vec![Arc::new(RecordingHandler::new("h", &seen))],
            Vec::new(),
        );

        engine
            .log(Level::Legacy(LegacySeverity::Warning), "legacy", Context::new())
            .unwrap();
        engine
            .log(Level::Legacy(LegacySeverity::ProfileBegin), "profile", Context::new())
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].1.level, StandardSeverity::Warning);
        assert_eq!(seen[1].1.level, StandardSeverity::Debug);
    }

    #[test]
    fn test_handler_error_propagates() {
        let seen = seen();
        let mut broken = RecordingHandler::new("broken", &seen);
        broken.fail = true;

        let engine = SlogEngine::new(
            "app",
            vec![Arc::new(broken), Arc::new(RecordingHandler::new("after", &seen))],
            Vec::new(),
        );

        let result = engine.critical("boom", Context::new());
        assert!(matches!(result, Err(BridgeError::Handler { .. })));
        assert!(names(&seen).is_empty());
    }

    #[test]
    fn test_operations() {
        let seen = seen();
        let mut strict = RecordingHandler::new("strict", &seen);
        strict.level = StandardSeverity::Error;

        let engine = SlogEngine::new(
            "shop",
            vec![Arc::new(strict)],
            vec![processors::placeholders()],
        );

        assert_eq!(engine.operations().len(), 6);
        assert_eq!(engine.invoke("get_name", &[]).unwrap(), json!("shop"));
        assert_eq!(engine.invoke("get_handlers", &[]).unwrap(), json!(["strict"]));
        assert_eq!(engine.invoke("get_processors", &[]).unwrap(), json!(1));
        assert_eq!(engine.invoke("get_levels", &[]).unwrap()["NOTICE"], json!(250));
        assert_eq!(
            engine.invoke("get_level_name", &[json!(550)]).unwrap(),
            json!("ALERT")
        );
        assert_eq!(engine.invoke("is_handling", &[json!("error")]).unwrap(), json!(true));
        assert_eq!(engine.invoke("is_handling", &[json!("info")]).unwrap(), json!(false));
        // legacy constants are understood as well
        assert_eq!(engine.invoke("is_handling", &[json!(1)]).unwrap(), json!(true));
    }

    #[test]
    fn test_operation_argument_errors() {
        let engine = SlogEngine::new("app", Vec::new(), Vec::new());

        assert!(matches!(
            engine.invoke("get_level_name", &[]),
            Err(BridgeError::InvalidArguments { .. })
        ));
        assert!(matches!(
            engine.invoke("is_handling", &[json!("loud")]),
            Err(BridgeError::InvalidArguments { .. })
        ));
        assert!(matches!(
            engine.invoke("push_handler", &[]),
            Err(BridgeError::UnknownMethod(_))
        ));
    }
}
