use suitest::{NodeId, Queueable, Spec, SpecConfig, Suite, SuiteConfig};

fn main() {
    let mut calculator = Suite::new(SuiteConfig {
        id: NodeId(1),
        description: "calculator".into(),
        on_start: Some(Box::new(|suite: &Suite| {
            println!("running {:?}", suite.full_name());
        })),
        result_callback: Some(Box::new(|result| {
            println!("suite {:?} finished with status {:?}", result.full_name, result.status);
        })),
        ..Default::default()
    });
    calculator.before_all(|| println!("  spinning up fixture"));
    calculator.after_all(|| println!("  tearing down fixture"));
    calculator.before_each(|| println!("  resetting state"));

    let mut addition = Suite::new(SuiteConfig {
        id: NodeId(2),
        description: "addition".into(),
        parent: Some(&calculator),
        ..Default::default()
    });
    addition.add_child(Spec::new(SpecConfig {
        id: NodeId(3),
        description: "adds small numbers".into(),
        parent: Some(&addition),
        body: Queueable::from_fn(|| assert_eq!(2 + 2, 4)),
        result_callback: Some(Box::new(|result| {
            println!("  spec {:?}: {}", result.full_name, result.status);
        })),
        ..Default::default()
    }));
    addition.add_child(Spec::new(SpecConfig {
        id: NodeId(4),
        description: "notices wrong sums".into(),
        parent: Some(&addition),
        body: Queueable::from_fn(|| Err::<(), &str>("2 + 2 is not 5")),
        result_callback: Some(Box::new(|result| {
            println!("  spec {:?}: {}", result.full_name, result.status);
        })),
        ..Default::default()
    }));
    calculator.add_child(addition);

    calculator.execute(|| println!("all done"));
}
