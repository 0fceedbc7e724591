use id3tree::prelude::*;
use id3tree::AttributeKind;

use polars::prelude::*;

use std::env;


#[test]
fn read_arff_file() {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/autism-small.arff");
    let data = DatasetReader::new()
        .file(path)
        .read()
        .unwrap();

    assert_eq!(data.shape(), (20, 6));
    let kinds = data.attributes()
        .iter()
        .map(|attr| attr.kind)
        .collect::<Vec<_>>();
    let exp = vec![
        AttributeKind::Nominal,
        AttributeKind::Nominal,
        AttributeKind::Numeric,
        AttributeKind::Nominal,
        AttributeKind::Numeric,
        AttributeKind::Nominal,
    ];
    assert_eq!(kinds, exp, "expected {exp:?}, got {kinds:?}.");

    assert!(data[12]["age"].is_missing());
    assert_eq!(data[0]["A1_Score"], Value::from("1"));
    assert_eq!(data[0]["Class/ASD"], Value::from("NO"));
}


#[test]
fn read_csv_file() {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/lecture.csv");
    let data = DatasetReader::new()
        .file(path)
        .has_header(true)
        .read()
        .unwrap();

    assert_eq!(data.shape(), (4, 6));
    assert_eq!(data[3]["Humor Docente"], Value::from("Bueno"));
    let values = data.distinct_values("Dedicacion").unwrap();
    assert_eq!(values.len(), 3);
}


#[test]
fn missing_file() {
    let res = DatasetReader::new()
        .file("tests/dataset/no-such-file.csv")
        .read();
    assert!(matches!(res, Err(Id3Error::Io(_))));
}


#[test]
fn grow_from_dataframe() {
    let outlook = Series::new(
        "outlook",
        &["sunny", "sunny", "overcast", "rainy", "rainy", "overcast"],
    );
    let windy = Series::new("windy", &[0_i64, 1, 0, 0, 1, 1]);
    let play = Series::new("play", &["no", "no", "yes", "yes", "no", "yes"]);
    let df = DataFrame::new(vec![outlook, windy, play]).unwrap();

    let data = Dataset::from_dataframe(&df).unwrap();
    assert_eq!(data.shape(), (6, 3));

    let f = Id3Builder::new(&data)
        .target("play")
        .numeric_attributes(["windy"])
        .build()
        .unwrap()
        .fit(&data)
        .unwrap();
    assert_eq!(f.validation_error(&data, "play").unwrap(), 0f64);
}
