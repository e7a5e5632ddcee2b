use std::{thread, time::Duration};

use suitest::{NodeId, Queueable, Spec, SpecConfig, Suite, SuiteConfig};

fn main() {
    let mut server = Suite::new(SuiteConfig {
        id: NodeId(1),
        description: "server".into(),
        ..Default::default()
    });

    // Setup that finishes on another thread; the next step waits for it.
    server.before_all_async(|done| {
        thread::spawn(move || {
            println!("booting server...");
            thread::sleep(Duration::from_millis(50));
            println!("server ready");
            done.ok();
        });
    });
    server.after_all(|| println!("server stopped"));

    server.add_child(Spec::new(SpecConfig {
        id: NodeId(2),
        description: "answers ping".into(),
        parent: Some(&server),
        body: Queueable::from_fn(|| println!("ping -> pong")),
        result_callback: Some(Box::new(|result| {
            println!("spec {:?}: {}", result.full_name, result.status);
        })),
        ..Default::default()
    }));

    server.execute(|| println!("run complete"));
}
