// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use rtls_simulator::*;

mod zone_transition_tests;


#[test]
fn test_core_id_types() {
    let tag_id = TagId::new("tag_001");
    let zone_id = ZoneId::from("zone_lobby");

    assert_eq!(tag_id.as_str(), "tag_001");
    assert_eq!(zone_id.to_string(), "zone_lobby");
    assert_eq!(serde_json::to_string(&tag_id).unwrap(), "\"tag_001\"");
}

#[test]
fn test_crate_root_reexports() {
    let config = SimulationConfig { seed: Some(1), ..Default::default() };
    let mut runner = SimulationRunner::new(config, MemoryPublisher::new()).unwrap().with_pacing(false);
    runner.run(Some(1)).unwrap();

    let engine: &SimulationEngine = runner.engine();
    let tag: &Tag = engine.tag("tag_001").unwrap();
    let update: LocationUpdate = engine.snapshot("tag_001").unwrap();

    assert_eq!(tag.tag_type, TagType::Person);
    assert_eq!(update.tag_id, tag.id);
    assert_eq!(engine.generation(), 1);
}
