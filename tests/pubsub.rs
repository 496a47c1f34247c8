//! End-to-end pub/sub behavior through the public API.

use std::sync::{Arc, Mutex};

use topicvisor::{
    Broker, BrokerError, Config, Dispatch, Dispatcher, Emitter, Envelope, Event, Handler,
    HandlerError, HandlerFn, HandlerRef, QueuedDispatcher, Subscriber,
};

#[derive(Clone, Debug, PartialEq)]
struct Order {
    id: u64,
    sku: &'static str,
}

type Ev = Envelope<Order>;
type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Records `tag@event_topic#id`.
fn recorder(tag: &'static str, log: &Log) -> HandlerRef<Ev> {
    let log = Arc::clone(log);
    HandlerFn::arc(tag, move |ev: &Ev| {
        log.lock()
            .unwrap()
            .push(format!("{tag}@{}#{}", ev.topic(), ev.payload.id));
        Ok(())
    })
}

fn order(topic: &str, id: u64) -> Ev {
    Envelope::new(topic, Order { id, sku: "sku-1" })
}

/// A handler type of its own, as opposed to a closure.
struct Inventory {
    reserved: Mutex<Vec<&'static str>>,
}

impl Handler<Ev> for Inventory {
    fn execute(&self, event: &Ev) -> Result<(), HandlerError> {
        if event.payload.sku.is_empty() {
            return Err(HandlerError::failed("missing sku"));
        }
        self.reserved.lock().unwrap().push(event.payload.sku);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "inventory"
    }
}

#[test]
fn every_handler_runs_once_in_registration_order() {
    let log = new_log();
    let emitter = Emitter::new();
    for tag in ["h1", "h2", "h3", "h4"] {
        emitter.on("orders", recorder(tag, &log));
    }

    emitter.emit("orders", &order("orders", 1)).unwrap();

    assert_eq!(
        entries(&log),
        vec!["h1@orders#1", "h2@orders#1", "h3@orders#1", "h4@orders#1"]
    );
}

#[test]
fn once_handler_is_not_invoked_again() {
    let log = new_log();
    let emitter = Emitter::new();
    emitter.once("orders", recorder("once", &log));

    emitter
        .emit("orders", &order("orders", 1))
        .unwrap()
        .emit("orders", &order("orders", 2))
        .unwrap();

    assert_eq!(entries(&log), vec!["once@orders#1"]);
    assert_eq!(emitter.listener_count("orders"), 0);
}

#[test]
fn emitting_to_unregistered_topic_is_ok() {
    let emitter: Emitter<Ev> = Emitter::new();
    assert!(emitter.emit("nobody-listens", &order("x", 1)).is_ok());
}

#[test]
fn fixed_broker_topic_wins() {
    let log = new_log();
    let emitter = Arc::new(Emitter::new());
    emitter
        .on("orders", recorder("orders", &log))
        .on("shipping", recorder("shipping", &log));

    Broker::new(Arc::clone(&emitter), "orders")
        .emit(&order("shipping", 7))
        .unwrap();

    assert_eq!(entries(&log), vec!["orders@shipping#7"]);
}

#[test]
fn empty_broker_topic_falls_back_to_event_topic() {
    let log = new_log();
    let emitter = Arc::new(Emitter::new());
    emitter
        .on("orders", recorder("orders", &log))
        .on("shipping", recorder("shipping", &log));

    Broker::new(Arc::clone(&emitter), "")
        .emit(&order("shipping", 8))
        .unwrap();

    assert_eq!(entries(&log), vec!["shipping@shipping#8"]);
}

#[test]
fn dispatcher_is_observably_identical_to_broker_emit() {
    let run = |through_dispatcher: bool| {
        let log = new_log();
        let broker = Broker::new(Arc::new(Emitter::new()), "orders");
        broker
            .add_handler(recorder("a", &log))
            .add_once(recorder("b", &log))
            .add_handler(recorder("c", &log));

        for id in 1..=2 {
            let ev = order("ignored", id);
            if through_dispatcher {
                Dispatcher::new(&broker).dispatch(&ev).unwrap();
            } else {
                broker.emit(&ev).unwrap();
            }
        }
        entries(&log)
    };

    assert_eq!(run(true), run(false));
    assert_eq!(
        run(true),
        vec![
            "a@ignored#1",
            "b@ignored#1",
            "c@ignored#1",
            "a@ignored#2",
            "c@ignored#2"
        ]
    );
}

#[test]
fn chained_add_handler_registers_both_in_order() {
    let log = new_log();
    let broker = Broker::new(Arc::new(Emitter::new()), "orders");
    broker
        .add_handler(recorder("h1", &log))
        .add_handler(recorder("h2", &log));

    broker.emit(&order("orders", 3)).unwrap();
    assert_eq!(entries(&log), vec!["h1@orders#3", "h2@orders#3"]);
}

#[test]
fn bare_subscriber_reports_unimplemented() {
    let sub: Subscriber<Ev> = Subscriber::new("orders");
    let err = sub.execute(&order("orders", 1)).unwrap_err();
    assert_eq!(err.as_label(), "handler_unimplemented");
}

#[test]
fn failing_handler_stops_the_pass_and_reaches_the_caller() {
    let log = new_log();
    let inventory = Arc::new(Inventory {
        reserved: Mutex::new(Vec::new()),
    });
    let broker = Broker::new(Arc::new(Emitter::new()), "orders");
    broker
        .add_handler(Arc::clone(&inventory) as HandlerRef<Ev>)
        .add_handler(recorder("after", &log));

    let bad = Envelope::new("orders", Order { id: 9, sku: "" });
    let err = broker.emit(&bad).unwrap_err();

    match &err {
        BrokerError::Handler { topic, handler, .. } => {
            assert_eq!(topic, "orders");
            assert_eq!(*handler, "inventory");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.handler_error(), Some(&HandlerError::failed("missing sku")));
    assert!(entries(&log).is_empty());

    broker.emit(&order("orders", 10)).unwrap();
    assert_eq!(*inventory.reserved.lock().unwrap(), vec!["sku-1"]);
    assert_eq!(entries(&log), vec!["after@orders#10"]);
}

#[test]
fn shared_handler_state_stays_readable_after_registration() {
    let inventory = Arc::new(Inventory {
        reserved: Mutex::new(Vec::new()),
    });
    let handler: HandlerRef<Ev> = inventory.clone();
    let broker = Broker::new(Arc::new(Emitter::new()), "orders");
    broker.add_handler(handler);

    broker
        .emit(&Envelope::new("orders", Order { id: 1, sku: "sku-a" }))
        .unwrap()
        .emit(&Envelope::new("orders", Order { id: 2, sku: "sku-b" }))
        .unwrap();

    assert_eq!(*inventory.reserved.lock().unwrap(), vec!["sku-a", "sku-b"]);
    assert_eq!(Arc::strong_count(&inventory), 2);
}

#[test]
fn specialized_subscriber_listens_on_its_own_topic() {
    let log = new_log();
    let emitter = Arc::new(Emitter::new());
    emitter.subscribe(Subscriber::new("audit").handle(recorder("audit", &log)));

    let unscoped = Broker::unscoped(Arc::clone(&emitter));
    unscoped
        .emit(&order("orders", 1))
        .unwrap()
        .emit(&order("audit", 2))
        .unwrap();

    assert_eq!(entries(&log), vec!["audit@audit#2"]);
}

#[tokio::test]
async fn queued_dispatcher_delivers_after_shutdown() {
    let log = new_log();
    let broker = Broker::new(Arc::new(Emitter::new()), "orders");
    broker.add_handler(recorder("q", &log));

    let queued = QueuedDispatcher::new(broker.clone(), &Config::default());
    queued
        .dispatch(&order("orders", 1))
        .unwrap()
        .dispatch(&order("orders", 2))
        .unwrap();
    queued.shutdown().await;

    assert_eq!(entries(&log), vec!["q@orders#1", "q@orders#2"]);
}
