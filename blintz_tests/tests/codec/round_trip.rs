use super::helpers::{self, Account, User};
use anyhow::{anyhow, Result};
use blintz_codec::archive::{deserialize_solo, serialize_solo};
use blintz_codec::obj::Obj;
use blintz_types::schema::Schema;
use blintz_types::serde::{Symbol, Value};

pub fn user_with_ada() -> Result<()> {
    let user = User {
        name: String::from("Ada"),
        age: 36,
        tags: vec![String::from("x"), String::from("y")],
    };
    let obj = Obj::Inst(Box::new(user));

    let bytes = serialize_solo(&obj, &helpers::user_schema())?;
    let back = deserialize_solo(&bytes, &helpers::registry())?;
    assert_eq!(obj, back);

    match back {
        Obj::Inst(inst) => {
            let user = inst
                .as_any()
                .downcast_ref::<User>()
                .ok_or_else(|| anyhow!("materialized instance is not a User"))?;
            assert_eq!(user.name, "Ada");
            assert_eq!(user.age, 36);
            assert_eq!(user.tags, vec![String::from("x"), String::from("y")]);
        }
        other => return Err(anyhow!("materialized a {} instead of a User", other.desc())),
    }

    Ok(())
}

/// An absent and a present nullable field, each through its own file.
pub fn nullable_int_across_two_files() -> Result<()> {
    let schema = helpers::account_schema();
    let registry = helpers::registry();

    let absent = Obj::Inst(Box::new(Account { balance: None }));
    let bytes = serialize_solo(&absent, &schema)?;
    let back = deserialize_solo(&bytes, &registry)?;
    assert_eq!(absent, back);

    let present = Obj::Inst(Box::new(Account { balance: Some(-5) }));
    let bytes = serialize_solo(&present, &schema)?;
    let back = deserialize_solo(&bytes, &registry)?;
    assert_eq!(present, back);
    match back {
        Obj::Inst(inst) => {
            let account = inst
                .as_any()
                .downcast_ref::<Account>()
                .ok_or_else(|| anyhow!("materialized instance is not an Account"))?;
            assert_eq!(account.balance, Some(-5));
        }
        other => return Err(anyhow!("materialized a {} instead of an Account", other.desc())),
    }

    Ok(())
}

pub fn empty_containers() -> Result<()> {
    let obj = Obj::Inst(Box::new(User {
        name: String::new(),
        age: 0,
        tags: vec![],
    }));

    let bytes = serialize_solo(&obj, &helpers::user_schema())?;
    let back = deserialize_solo(&bytes, &helpers::registry())?;
    assert_eq!(obj, back);

    Ok(())
}

/// A dict of lists of nullable dicts, under a dict-root schema.
pub fn deeply_nested() -> Result<()> {
    let schema = Schema::Dict {
        key: Box::new(Schema::Str),
        val: Box::new(Schema::List {
            elem: Box::new(Schema::Nullable(Box::new(Schema::Dict {
                key: Box::new(Schema::Int),
                val: Box::new(Schema::Bool),
            }))),
        }),
    };
    let obj = Obj::Dict(vec![
        (
            Obj::from("a"),
            Obj::List(vec![
                Obj::Dict(vec![(Obj::Int(1), Obj::Bool(true))]),
                Obj::Null,
            ]),
        ),
        (Obj::from("b"), Obj::List(vec![])),
    ]);

    let bytes = serialize_solo(&obj, &schema)?;
    let back = deserialize_solo(&bytes, &helpers::registry())?;
    assert_eq!(obj, back);

    Ok(())
}

/// The outer record is a plain dict holding the schema's own entries plus
/// `object_data`; a reader with no schema at all can still walk it.
pub fn schema_rides_inside_the_file() -> Result<()> {
    let obj = Obj::Inst(Box::new(User {
        name: String::from("Ada"),
        age: 36,
        tags: vec![],
    }));
    let bytes = serialize_solo(&obj, &helpers::user_schema())?;

    let file_val = Value::deser_solo(&bytes)?;
    assert!(file_val.dict_get(Symbol::ObjectData.name()).is_some());
    assert_eq!(
        file_val.dict_get(Symbol::Type.name()),
        Some(&Value::Str(String::from("class")))
    );

    let meta_entries = match file_val {
        Value::Dict(entries) => entries
            .into_iter()
            .filter(|(k, _)| !matches!(k, Value::Str(s) if s == Symbol::ObjectData.name()))
            .collect::<Vec<_>>(),
        other => return Err(anyhow!("file record is a {}", other.desc())),
    };
    let recovered = Schema::from_meta(&Value::Dict(meta_entries))?;
    assert_eq!(recovered, helpers::user_schema());

    Ok(())
}
