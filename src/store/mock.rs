use crate::{common, error, read, store, write};

use async_trait::async_trait;
use std::{collections, io, sync};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Request {
    GetItem(read::get_item::GetItemInput),
    PutItem(write::put_item::PutItemInput),
    UpdateItem(write::update_item::UpdateItemInput),
    DeleteItem(write::delete_item::DeleteItemInput),
    Query(read::query::QueryInput),
    Scan(read::scan::ScanInput),
    TransactWriteItems(write::transact_write_items::TransactWriteInput),
    DescribeTable(String),
}

/// In-memory store that records every request and replays scripted answers.
#[derive(Debug, Default)]
pub(crate) struct MockStore {
    pub(crate) requests: sync::Mutex<Vec<Request>>,
    pub(crate) pages: sync::Mutex<collections::VecDeque<read::common::Page>>,
    pub(crate) record: Option<common::Record>,
    pub(crate) table_status: Option<String>,
    pub(crate) reject: bool,
}

impl MockStore {
    pub(crate) fn with_pages(pages: Vec<read::common::Page>) -> Self {
        Self {
            pages: sync::Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub(crate) fn with_record(record: common::Record) -> Self {
        Self {
            record: Some(record),
            ..Default::default()
        }
    }

    pub(crate) fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn record_request(&self, request: Request) -> error::Result<()> {
        self.requests.lock().unwrap().push(request);
        if self.reject {
            let err = io::Error::other("request rejected");
            return Err(error::Error::Store(Box::new(err)));
        }
        Ok(())
    }

    fn next_page(&self) -> read::common::Page {
        self.pages.lock().unwrap().pop_front().unwrap_or_default()
    }
}

#[async_trait]
impl store::RecordStore for MockStore {
    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> error::Result<Option<common::Record>> {
        self.record_request(Request::GetItem(input))?;
        Ok(self.record.clone())
    }

    async fn put_item(&self, input: write::put_item::PutItemInput) -> error::Result<()> {
        self.record_request(Request::PutItem(input))
    }

    async fn update_item(
        &self,
        input: write::update_item::UpdateItemInput,
    ) -> error::Result<Option<common::Record>> {
        self.record_request(Request::UpdateItem(input))?;
        Ok(self.record.clone())
    }

    async fn delete_item(
        &self,
        input: write::delete_item::DeleteItemInput,
    ) -> error::Result<Option<common::Record>> {
        self.record_request(Request::DeleteItem(input))?;
        Ok(self.record.clone())
    }

    async fn query(&self, input: read::query::QueryInput) -> error::Result<read::common::Page> {
        self.record_request(Request::Query(input))?;
        Ok(self.next_page())
    }

    async fn scan(&self, input: read::scan::ScanInput) -> error::Result<read::common::Page> {
        self.record_request(Request::Scan(input))?;
        Ok(self.next_page())
    }

    async fn transact_write_items(
        &self,
        input: write::transact_write_items::TransactWriteInput,
    ) -> error::Result<()> {
        self.record_request(Request::TransactWriteItems(input))
    }

    async fn describe_table(&self, table_name: String) -> error::Result<Option<String>> {
        self.record_request(Request::DescribeTable(table_name))?;
        Ok(self.table_status.clone())
    }
}
