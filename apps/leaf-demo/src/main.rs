use leaf_core::LeafConfig;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Leaf page stacking walk ===");
    let (leaf, steps) = leaf_demo::run(LeafConfig::default())?;
    for step in &steps {
        println!("{:<24} root {:?}", step.label, step.root);
        println!("{:<24} alt  {:?}", "", step.alt);
    }
    println!();
    print!("{}", leaf.dom().dump_tree());
    Ok(())
}
