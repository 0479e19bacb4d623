//! Lifecycle contract tests
//!
//! These pin the observable notification behavior of a data object: one
//! created event per activation, one deleted event per deactivation, nothing
//! in between, and a hard error for releasing an unheld object.

#[cfg(test)]
mod tests {
    use data_events::{DataEventKind, RecordingSink};
    use data_lifecycle::LifecycleError;
    use data_object::{Data, DataObject};
    use std::rc::Rc;

    #[test]
    fn test_multi_holder_session_emits_one_edge_pair() {
        let sink = Rc::new(RecordingSink::new());
        let mut image = DataObject::named("Cell-001");
        image.bind_sink(sink.clone());

        // Several transient holders take and release references.
        image.increment_references();
        image.increment_references();
        image.increment_references();
        image.decrement_references().unwrap();
        image.increment_references();
        image.decrement_references().unwrap();
        image.decrement_references().unwrap();
        image.decrement_references().unwrap();

        assert_eq!(sink.count(DataEventKind::Created), 1);
        assert_eq!(sink.count(DataEventKind::Deleted), 1);

        let events = sink.events();
        assert_eq!(events.first().map(|e| e.kind), Some(DataEventKind::Created));
        assert_eq!(events.last().map(|e| e.kind), Some(DataEventKind::Deleted));
    }

    #[test]
    fn test_shared_sink_attributes_events_to_objects() {
        let sink = Rc::new(RecordingSink::new());

        let mut image = DataObject::named("Cell-001");
        let mut overlay = DataObject::named("Roi-7");
        image.bind_sink(sink.clone());
        overlay.bind_sink(sink.clone());

        image.increment_references();
        overlay.increment_references();
        overlay.decrement_references().unwrap();
        image.decrement_references().unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].object, image.id());
        assert_eq!(events[1].object, overlay.id());
        assert_eq!(events[2].object, overlay.id());
        assert_eq!(events[3].object, image.id());
    }

    #[test]
    fn test_release_of_unheld_object_is_an_error_even_after_a_session() {
        let sink = Rc::new(RecordingSink::new());
        let mut image = DataObject::named("Cell-001");
        image.bind_sink(sink.clone());

        image.increment_references();
        image.decrement_references().unwrap();

        assert_eq!(
            image.decrement_references(),
            Err(LifecycleError::AlreadyReleased)
        );
        // The failed release neither mutated state nor published.
        assert_eq!(image.reference_count(), 0);
        assert_eq!(sink.len(), 2);
    }
}
