// tests/pipeline.rs
use anyhow::Result;
use retail_etl::testing::*;
use retail_etl::*;

fn cosmos_output() -> Result<PipelineOutput> {
    Ok(run_cosmos(
        &sample_cosmos_batches(),
        &mappings(&[(5000, 1), (5001, 2)], &[(100, 10)]),
        &EtlConfig::default(),
    )?)
}

#[test]
fn cosmos_end_to_end() -> Result<()> {
    let out = cosmos_output()?;
    assert_eq!(out.unified.len(), 3);

    // Corrected sale and split delivery on 2024-01-01.
    let milk = &out.app[0];
    assert_eq!((milk.number_product, milk.target_date), (5000, ymd(2024, 1, 1)));
    assert_eq!((milk.sales_qty, milk.return_qty, milk.delivery_qty), (0.0, 2.0, 8.0));
    assert!(!milk.stockout);
    assert_eq!((milk.price, milk.moq), (Some(1.29), Some(12)));
    assert_eq!(milk.store_address.as_deref(), Some("Hauptstraße 1 – 10115 – Berlin"));

    // Equal sales and delivery is not a stockout.
    let bread = &out.app[1];
    assert_eq!((bread.sales_qty, bread.delivery_qty), (1.0, 1.0));
    assert!(!bread.stockout);
    assert_eq!(bread.moq, Some(0));

    // A sale without a delivery.
    let unmatched = &out.app[2];
    assert_eq!(unmatched.target_date, ymd(2024, 1, 2));
    assert_eq!((unmatched.sales_qty, unmatched.delivery_qty), (4.0, 0.0));
    assert!(unmatched.stockout);
    Ok(())
}

#[test]
fn datasets_mirror_the_unified_table() -> Result<()> {
    let out = cosmos_output()?;
    assert_eq!(out.ml.len(), out.unified.len());
    assert_eq!(out.app.len(), out.unified.len());

    for ((u, ml), app) in out.unified.iter().zip(&out.ml).zip(&out.app) {
        assert_eq!(ml, &MlRecord::from(u));
        assert_eq!(app, &AppRecord::from(u));
        assert_eq!((ml.id_product, ml.id_store), (u.id_product, u.id_store));
    }
    assert_eq!(out.ml[0].id_product, Some(1));
    assert_eq!(out.ml[0].id_store, Some(10));
    Ok(())
}

#[test]
fn runs_are_reproducible() -> Result<()> {
    assert_eq!(cosmos_output()?, cosmos_output()?);
    Ok(())
}

#[test]
fn galaxy_end_to_end() -> Result<()> {
    let out = run_galaxy(
        &sample_galaxy_batches(),
        &mappings(&[(7000, 70)], &[(200, 20)]),
        &EtlConfig::default(),
    )?;

    assert_eq!(out.app.len(), 2);
    let apple = &out.app[0];
    assert_eq!((apple.sales_qty, apple.return_qty, apple.delivery_qty), (9.0, 0.0, 6.0));
    assert!(apple.stockout);
    assert_eq!((apple.id_product, apple.id_store), (Some(70), Some(20)));
    assert_eq!((apple.price, apple.moq), (Some(0.5), Some(6)));

    let pear = &out.app[1];
    assert_eq!(pear.id_product, None);
    assert_eq!(pear.price, None);
    assert_eq!(pear.product_name.as_deref(), Some("Birne"));
    Ok(())
}

#[test]
fn errors_stop_the_run() -> Result<()> {
    let mut input = sample_cosmos_batches();
    input.stores = batches([("stores.csv", vec![store_row(1, "x", 1.0, "y")])]);
    let err = run_cosmos(&input, &Mappings::default(), &EtlConfig::default()).unwrap_err();
    assert_eq!(err.batch_label(), Some("stores.csv"));
    Ok(())
}

#[test]
fn json_field_order_matches_dataset_columns() -> Result<()> {
    let out = cosmos_output()?;
    let ml = serde_json::to_string(&out.ml[0])?;
    assert_eq!(
        ml,
        r#"{"id_product":1,"id_store":10,"target_date":"2024-01-01","sales_qty":0.0,"stockout":false}"#
    );
    Ok(())
}

#[cfg(feature = "io-csv")]
#[test]
fn app_csv_header_lists_columns_in_order() -> Result<()> {
    let out = cosmos_output()?;
    let mut buf = Vec::new();
    assert_eq!(write_csv_rows(&mut buf, &out.app)?, 3);

    let text = String::from_utf8(buf)?;
    let header = text.lines().next().unwrap_or_default();
    assert_eq!(
        header,
        "id_product,id_store,target_date,sales_qty,return_qty,delivery_qty,stockout,price,\
         product_name,number_product,moq,number_store,store_name,store_address"
    );
    Ok(())
}
