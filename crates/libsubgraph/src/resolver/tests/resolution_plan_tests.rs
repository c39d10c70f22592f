use crate::resolver::ResolutionPlan;
use crate::resolver::ResolveError;
use crate::synthetic::SyntheticFieldRegistry;
use crate::synthetic::add;
use crate::synthetic::mul;
use crate::test::fixtures::dex_schema;

#[test]
fn dependencies_come_first() {
    let schema = dex_schema();
    let mut registry = SyntheticFieldRegistry::new(&schema);
    let record = schema.object("Record").unwrap();
    let total = registry.register(
        "Record",
        "total",
        add(record.path("a").unwrap(), record.path("b").unwrap()),
    ).unwrap();
    let doubled = registry.register(
        "Record",
        "doubled",
        mul(record.synthetic(&registry, "total").unwrap(), 2),
    ).unwrap();
    let both = registry.register(
        "Record",
        "both",
        add(
            record.synthetic(&registry, "doubled").unwrap(),
            record.synthetic(&registry, "total").unwrap(),
        ),
    ).unwrap();

    let plan = ResolutionPlan::build(&registry, std::slice::from_ref(&both)).unwrap();
    assert_eq!(plan.order(), &[total.clone(), doubled.clone(), both.clone()]);
    assert_eq!(plan.position(&total), Some(0));
    assert_eq!(plan.position(&both), Some(2));

    let plan = ResolutionPlan::build(&registry, std::slice::from_ref(&total)).unwrap();
    assert_eq!(plan.order(), std::slice::from_ref(&total));
    assert_eq!(plan.position(&doubled), None);
}

#[test]
fn unregistered_fields_are_rejected() {
    let schema = dex_schema();
    let mut other = SyntheticFieldRegistry::new(&schema);
    let record = schema.object("Record").unwrap();
    let foreign = other.register("Record", "total", add(record.path("a").unwrap(), 1)).unwrap();

    let empty = SyntheticFieldRegistry::new(&schema);
    assert_eq!(
        ResolutionPlan::build(&empty, &[foreign]).unwrap_err(),
        ResolveError::UnknownSyntheticField {
            name: "Record.total".to_string(),
        },
    );
}
