#![cfg(feature = "serde")]

use segviz_region::{
    segmentation::{ConnectRule, SegmentationVariant, SlicConfig},
    ExecutionStrategy, SegmentationConfig,
};

#[test]
fn config_from_json() -> Result<(), serde_json::Error> {
    let config: SegmentationConfig = serde_json::from_str(
        r#"{
            "variant": { "kind": "slic", "num_superpixels": 400, "connect_rule": "Four" },
            "palette_seed": 7,
            "strategy": { "Fixed": 4 }
        }"#,
    )?;

    assert_eq!(config.palette_seed, 7);
    assert_eq!(config.strategy, ExecutionStrategy::Fixed(4));
    assert_eq!(
        config.variant,
        SegmentationVariant::Slic(SlicConfig {
            num_superpixels: 400,
            connect_rule: ConnectRule::Four,
            ..Default::default()
        })
    );

    Ok(())
}

#[test]
fn empty_json_gives_defaults() -> Result<(), serde_json::Error> {
    let config: SegmentationConfig = serde_json::from_str("{}")?;
    assert_eq!(config, SegmentationConfig::default());

    let json = serde_json::to_string(&config)?;
    let back: SegmentationConfig = serde_json::from_str(&json)?;
    assert_eq!(back, config);

    Ok(())
}
