use crate::ValueWrap;
use mysql_async::FromRowError;
use tabula_core::{Row, RowLabeled, RowNames};

pub(crate) struct RowWrap(pub(crate) RowLabeled);

impl mysql_async::prelude::FromRow for RowWrap {
    fn from_row_opt(mut row: mysql_async::Row) -> Result<Self, FromRowError>
    where
        Self: Sized,
    {
        let columns = row.columns();
        let names: RowNames = columns
            .iter()
            .map(|v| v.name_str().into_owned())
            .collect();
        let values: Result<Row, ()> = (0..row.len())
            .map(|i| match row.take_opt::<mysql_async::Value, _>(i) {
                Some(Ok(value)) => ValueWrap::decode(value, &columns[i])
                    .map(|v| v.0)
                    .map_err(|_| ()),
                _ => Err(()),
            })
            .collect();
        match values {
            Ok(values) => Ok(RowWrap(RowLabeled::new(names, values))),
            Err(..) => Err(FromRowError(row)),
        }
    }
}
