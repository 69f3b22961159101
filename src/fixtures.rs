#[cfg(test)]
pub mod test {
    use serde::Deserialize;

    use crate::schema::{FlagModel, FlagSpec};

    /// A document touching every way a flag key can be spelled.
    pub const REFERENCE_CONFIG: &str = r#"
        flag-name = "hello world"
        int-flag = 10
        float-flag = 10.5
        slice-flag = [1, 2, 3]

        prefix {
            prefixed-flag = "prefixed flag"
        }
        group {
            grouped-flag = "grouped flag"
            embedded-flag = "embedded flag"
        }
        command {
            command-flag = "command flag"
        }
    "#;

    /// A document carrying an opaque fragment for a raw flag.
    pub const FRAGMENT_CONFIG: &str = r#"
        flag = "hello"
        fragment {
            str = "field"
            num = 10
            obj {
                one = 1
                two = 2
            }
        }
    "#;

    /// The fragment body on its own, as it would appear in a separate file.
    pub const FRAGMENT_BODY: &str = r#"
        str = "field"
        num = 10
        obj {
            one = 1
            two = 2
        }
    "#;

    /// The flags [`REFERENCE_CONFIG`] is written against.
    pub fn reference_model() -> FlagModel {
        FlagModel::new()
            .flag(FlagSpec::new("flag-name"))
            .flag(FlagSpec::new("int-flag"))
            .flag(FlagSpec::new("float-flag"))
            .flag(FlagSpec::new("slice-flag"))
            .flag(FlagSpec::new("prefixed-flag").prefix("prefix-"))
            .flag(FlagSpec::new("grouped-flag").group("group"))
            .flag(FlagSpec::new("embedded-flag").group("group"))
            .flag(FlagSpec::new("command-flag").commands(["command"]))
    }

    #[derive(Deserialize, Debug, PartialEq)]
    pub struct Frag {
        pub str: String,
        pub num: i64,
        pub obj: FragObj,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    pub struct FragObj {
        pub one: i64,
        pub two: i64,
    }

    pub fn expected_frag() -> Frag {
        Frag {
            str: "field".into(),
            num: 10,
            obj: FragObj { one: 1, two: 2 },
        }
    }

    #[test]
    fn reference_model_keys() {
        let schema = reference_model().schema();
        let keys: Vec<&str> = schema.valid.iter().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "flag-name",
                "int-flag",
                "float-flag",
                "slice-flag",
                "prefix-prefixed-flag",
                "group-grouped-flag",
                "group-embedded-flag",
                "command-command-flag",
            ]
        );
    }
}
