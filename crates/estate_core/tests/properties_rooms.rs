use estate_core::{
    Agent, AgentService, ConstraintKind, ErrorKind, NewProperty, PasswordHasher, PropertyPatch,
    PropertyService, ServiceError, SessionFactory,
};

fn seed_agent(sessions: &SessionFactory) -> Agent {
    AgentService::new(sessions, PasswordHasher::with_cost(PasswordHasher::MIN_COST))
        .signup("Ana", "a@x.com", "pw")
        .unwrap()
}

fn row_count(sessions: &SessionFactory, table: &str) -> i64 {
    sessions
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })
        .unwrap()
}

#[test]
fn property_created_for_agent_is_listed() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let ana = seed_agent(&sessions);
    let properties = PropertyService::new(&sessions);

    let property = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", ana.id))
        .unwrap();
    assert_eq!(property.agent_id, ana.id);
    assert_eq!(property.address, "1 Main St");

    let listed = properties.list_properties().unwrap();
    assert_eq!(listed, vec![property]);
}

#[test]
fn property_for_missing_agent_is_rolled_back() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let properties = PropertyService::new(&sessions);

    let err = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", 42))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ConstraintViolation(ConstraintKind::ForeignKey)
    ));
    assert_eq!(row_count(&sessions, "properties"), 0);
}

#[test]
fn update_property_applies_only_named_fields() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let ana = seed_agent(&sessions);
    let properties = PropertyService::new(&sessions);
    let created = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", ana.id))
        .unwrap();

    let updated = properties
        .update_property(
            created.id,
            &PropertyPatch {
                address: Some("2 Elm St".to_string()),
                location: None,
            },
        )
        .unwrap();
    assert_eq!(updated.address, "2 Elm St");
    assert_eq!(updated.location, "Springfield");
    assert_eq!(properties.get_property(created.id).unwrap(), Some(updated));
}

#[test]
fn update_missing_property_is_not_found_and_changes_nothing() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let ana = seed_agent(&sessions);
    let properties = PropertyService::new(&sessions);
    let existing = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", ana.id))
        .unwrap();

    let patch = PropertyPatch {
        address: Some("elsewhere".to_string()),
        location: Some("nowhere".to_string()),
    };
    let err = properties.update_property(existing.id + 100, &patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(properties.list_properties().unwrap(), vec![existing]);
}

#[test]
fn blank_update_is_rejected() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let ana = seed_agent(&sessions);
    let properties = PropertyService::new(&sessions);
    let existing = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", ana.id))
        .unwrap();

    let err = properties
        .update_property(
            existing.id,
            &PropertyPatch {
                address: Some("  ".to_string()),
                location: None,
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert_eq!(properties.get_property(existing.id).unwrap(), Some(existing));
}

#[test]
fn rooms_are_added_listed_and_deleted() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let ana = seed_agent(&sessions);
    let properties = PropertyService::new(&sessions);
    let home = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", ana.id))
        .unwrap();
    let other = properties
        .add_property(&NewProperty::new("3 Oak St", "Shelbyville", ana.id))
        .unwrap();

    let kitchen = properties.add_room("Kitchen", "12.5", home.id).unwrap();
    let bedroom = properties.add_room("Bedroom", " 20 ", home.id).unwrap();
    properties.add_room("Garage", "30", other.id).unwrap();
    assert_eq!(kitchen.size, 12.5);
    assert_eq!(bedroom.size, 20.0);

    assert_eq!(properties.list_rooms().unwrap().len(), 3);
    assert_eq!(
        properties.list_rooms_for_property(home.id).unwrap(),
        vec![kitchen.clone(), bedroom.clone()]
    );

    properties.delete_room(kitchen.id).unwrap();
    assert!(properties.get_room(kitchen.id).unwrap().is_none());
    assert_eq!(
        properties.list_rooms_for_property(home.id).unwrap(),
        vec![bedroom]
    );
}

#[test]
fn room_size_must_be_a_non_negative_number() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let ana = seed_agent(&sessions);
    let properties = PropertyService::new(&sessions);
    let home = properties
        .add_property(&NewProperty::new("1 Main St", "Springfield", ana.id))
        .unwrap();

    for size in ["big", "-3", "NaN"] {
        let err = properties.add_room("Attic", size, home.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat, "size {size}");
    }
    assert_eq!(row_count(&sessions, "rooms"), 0);
}

#[test]
fn room_for_missing_property_is_rolled_back() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let properties = PropertyService::new(&sessions);

    let err = properties.add_room("Kitchen", "10", 7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
    assert_eq!(row_count(&sessions, "rooms"), 0);
}

#[test]
fn deleting_missing_room_is_not_found() {
    let sessions = SessionFactory::open_in_memory().unwrap();
    let properties = PropertyService::new(&sessions);

    assert!(matches!(
        properties.delete_room(5),
        Err(ServiceError::NotFound {
            entity: "room",
            id: 5
        })
    ));
}
