//! 地点相关请求 DTO 定义
//!
//! 地址与坐标作为外部请求的一部分进入平台，在构造处完成校验，
//! 校验失败的对象不允许进入后续业务流程。

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::GreenCityError;

/// 地址与地理坐标
///
/// `lat` 与 `lng` 在线上负载中可能缺失，反序列化为 `Option` 后
/// 由 `required` 校验强制两者同时存在。
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressGeo {
    #[validate(
        custom(function = validate_not_blank),
        length(min = 3, max = 120, message = "地址长度必须在3-120个字符之间")
    )]
    pub address: String,
    #[validate(required(message = "纬度不能为空"))]
    pub lat: Option<f64>,
    #[validate(required(message = "经度不能为空"))]
    pub lng: Option<f64>,
}

/// 地址不允许为空白字符串
fn validate_not_blank(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("地址不能为空白".into());
        return Err(err);
    }
    Ok(())
}

impl AddressGeo {
    /// 构造并校验
    ///
    /// 所有字段在构造时即已知，校验通过才返回可用对象。
    pub fn validated(
        address: impl Into<String>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Result<Self, GreenCityError> {
        let dto = Self {
            address: address.into(),
            lat,
            lng,
        };
        dto.validate()?;
        Ok(dto)
    }
}
