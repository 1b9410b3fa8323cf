//! 测试用内存连接与样例文档

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use vcd_session::{media_type, Connection, Result, SessionError};

pub const VDC_LINK: &str = "/api/vdc/vdc-1";
pub const EMPTY_VDC_LINK: &str = "/api/vdc/vdc-empty";
pub const VDC_WITH_TWO_DISKS_LINK: &str = "/api/vdc/vdc-two-disks";
pub const VDC_WITH_SPACE_LINK: &str = "/api/vdc/vdc-space";
pub const MISSING_VDC_LINK: &str = "/api/vdc/missing";

pub const VDC_NAME: &str = "ovdc-1";
pub const EMPTY_VDC_NAME: &str = "ovdc-empty";
pub const OVDC_NAME_WITH_SPACE: &str = "OVDC with space";

pub const STORAGE_PROFILE_NAME: &str = "sp-gold";
pub const STORAGE_PROFILE_LINK: &str = "/api/vdcStorageProfile/sp-gold";
pub const STORAGE_PROFILE_USED_MB: i64 = 2048;
pub const STORAGE_PROFILE_LIMIT_MB: i64 = 10240;

pub const VAPP_NAME: &str = "vapp-1";
pub const VAPP_LINK: &str = "/api/vApp/vapp-1";

pub const ISOLATED_NETWORK_NAME: &str = "164-935-default-isolated";
pub const ORG_NETWORK_NAME: &str = "org-net-1";

pub const INDY_DISK_NAME: &str = "indy_disk_1";
pub const INDY_DISK_URL: &str = "/api/disk/indy-1";
pub const SECOND_INDY_DISK_URL: &str = "/api/disk/indy-2";
pub const NEW_DISK_URL: &str = "/api/disk/new-1";
pub const ADD_DISK_LINK: &str = "/api/vdc/vdc-1/disk";

pub const VM_NAME: &str = "vm1";
pub const VM_LINK: &str = "/api/vApp/vm-1";

pub const EDGE_GATEWAY_NAME: &str = "164-935";
pub const EDGE_GATEWAYS_LINK: &str = "/api/admin/vdc/vdc-1/edgeGateways";

/// 初始化测试日志
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vcd_vdc=debug")
        .with_test_writer()
        .try_init();
}

/// 内存中的平台连接
///
/// 按链接返回预置文档，记录全部 post / delete 请求，可按链接注入删除失败。
pub struct MockConnection {
    documents: Mutex<HashMap<String, Value>>,
    failing_deletes: Mutex<HashSet<String>>,
    fail_posts: Mutex<bool>,
    posts: Mutex<Vec<(String, Value, String)>>,
    deletes: Mutex<Vec<String>>,
}

impl MockConnection {
    /// 预置全部样例文档
    pub fn new() -> Self {
        let mock = Self {
            documents: Mutex::new(HashMap::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            fail_posts: Mutex::new(false),
            posts: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        };

        mock.insert(VDC_LINK, vdc_document(VDC_NAME, VDC_LINK, &[INDY_DISK_URL], true));
        mock.insert(EMPTY_VDC_LINK, empty_vdc_document());
        mock.insert(
            VDC_WITH_TWO_DISKS_LINK,
            vdc_document(VDC_NAME, VDC_WITH_TWO_DISKS_LINK, &[INDY_DISK_URL, SECOND_INDY_DISK_URL], true),
        );
        mock.insert(
            VDC_WITH_SPACE_LINK,
            vdc_document(OVDC_NAME_WITH_SPACE, VDC_WITH_SPACE_LINK, &[], false),
        );

        // 存储策略只通过查询记录提供，策略链接本身没有文档
        mock.insert(&storage_profile_query(VDC_NAME), storage_profile_records(VDC_NAME));
        mock.insert(
            &storage_profile_query(OVDC_NAME_WITH_SPACE),
            storage_profile_records(OVDC_NAME_WITH_SPACE),
        );
        mock.insert(&storage_profile_query(EMPTY_VDC_NAME), json!({ "record": [] }));

        mock.insert(VAPP_LINK, json!({ "name": VAPP_NAME, "href": VAPP_LINK, "status": 4 }));

        mock.insert(
            "/api/network/isolated",
            json!({ "name": ISOLATED_NETWORK_NAME, "href": "/api/network/isolated", "fenceMode": "isolated" }),
        );
        mock.insert(
            "/api/network/org",
            json!({ "name": ORG_NETWORK_NAME, "href": "/api/network/org", "fenceMode": "bridged" }),
        );

        mock.insert(INDY_DISK_URL, disk_document(INDY_DISK_URL, false));
        mock.insert(SECOND_INDY_DISK_URL, disk_document(SECOND_INDY_DISK_URL, false));
        mock.insert(NEW_DISK_URL, disk_document(NEW_DISK_URL, false));

        mock.insert(
            EDGE_GATEWAYS_LINK,
            json!({ "record": [{ "name": EDGE_GATEWAY_NAME, "href": "/api/admin/edgeGateway/eg-1" }] }),
        );
        mock.insert(
            "/api/admin/edgeGateway/eg-1",
            json!({ "name": EDGE_GATEWAY_NAME, "href": "/api/admin/edgeGateway/eg-1", "haStatus": "DISABLED" }),
        );

        mock
    }

    pub fn insert(&self, link: &str, document: Value) {
        self.documents.lock().unwrap().insert(link.to_string(), document);
    }

    /// 将磁盘标记为已挂载到样例虚拟机
    pub fn attach_disk(&self, link: &str) {
        self.insert(link, disk_document(link, true));
    }

    /// 之后对该链接的删除请求返回 400
    pub fn fail_delete(&self, link: &str) {
        self.failing_deletes.lock().unwrap().insert(link.to_string());
    }

    /// 之后的 post 请求返回 400
    pub fn fail_posts(&self) {
        *self.fail_posts.lock().unwrap() = true;
    }

    pub fn posts(&self) -> Vec<(String, Value, String)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn get(&self, link: &str) -> Result<Value> {
        self.documents
            .lock()
            .unwrap()
            .get(link)
            .cloned()
            .ok_or_else(|| api_error(404, link, "Not Found"))
    }

    async fn post(&self, link: &str, payload: Value, media_type: &str) -> Result<Value> {
        if *self.fail_posts.lock().unwrap() {
            return Err(api_error(400, link, "Bad Request"));
        }
        self.posts
            .lock()
            .unwrap()
            .push((link.to_string(), payload, media_type.to_string()));
        Ok(json!({ "name": "created", "href": NEW_DISK_URL }))
    }

    async fn delete(&self, link: &str) -> Result<()> {
        if self.failing_deletes.lock().unwrap().contains(link) {
            return Err(api_error(400, link, "Bad Request"));
        }
        self.deletes.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

fn api_error(status: u16, link: &str, body: &str) -> SessionError {
    SessionError::Api {
        status,
        link: link.to_string(),
        body: body.to_string(),
    }
}

pub fn storage_profile_query(vdc_name: &str) -> String {
    vcd_vdc::models::storage_profile_query(vdc_name)
}

fn storage_profile_records(vdc_name: &str) -> Value {
    json!({
        "record": [{
            "name": STORAGE_PROFILE_NAME,
            "href": STORAGE_PROFILE_LINK,
            "vdcName": vdc_name,
            "storageUsedMB": STORAGE_PROFILE_USED_MB,
            "storageLimitMB": STORAGE_PROFILE_LIMIT_MB
        }]
    })
}

fn vdc_document(name: &str, link: &str, disk_links: &[&str], with_edge_gateways: bool) -> Value {
    let mut entities = vec![json!({ "name": VAPP_NAME, "href": VAPP_LINK, "type": media_type::VAPP })];
    for disk_link in disk_links {
        entities.push(json!({ "name": INDY_DISK_NAME, "href": disk_link, "type": media_type::DISK }));
    }

    let mut links = vec![json!({ "rel": "add", "href": ADD_DISK_LINK, "type": media_type::DISK_CREATE_PARAMS })];
    if with_edge_gateways {
        links.push(json!({ "rel": "edgeGateways", "href": EDGE_GATEWAYS_LINK }));
    }

    json!({
        "name": name,
        "href": link,
        "computeCapacity": {
            "cpu": { "units": "cores", "limit": 8, "used": 4 },
            "memory": { "units": "MB", "limit": 8192, "used": 4096 }
        },
        "resourceEntities": entities,
        "availableNetworks": [
            { "name": ISOLATED_NETWORK_NAME, "href": "/api/network/isolated" },
            { "name": ORG_NETWORK_NAME, "href": "/api/network/org" }
        ],
        "links": links
    })
}

fn empty_vdc_document() -> Value {
    json!({
        "name": EMPTY_VDC_NAME,
        "href": EMPTY_VDC_LINK,
        "computeCapacity": {
            "cpu": { "units": "cores", "limit": 0, "used": 2 },
            "memory": { "units": "MB", "limit": 0, "used": 1024 }
        },
        "resourceEntities": [],
        "availableNetworks": [],
        "links": []
    })
}

fn disk_document(link: &str, attached: bool) -> Value {
    let mut document = json!({
        "name": INDY_DISK_NAME,
        "href": link,
        "sizeMb": 100,
        "busType": "6",
        "busSubType": "lsilogic"
    });
    if attached {
        document["attachedVm"] = json!({ "name": VM_NAME, "href": VM_LINK });
    }
    document
}
