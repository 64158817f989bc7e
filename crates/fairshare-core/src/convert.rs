//! Wire DTO -> domain conversions.

use fairshare_api::models::{ClientDto, HistoryDto, RouterInfoDto, StatusDto};

use crate::model::{
    ClientRecord, HistorySeries, NetworkStats, RouterInfo, RouterMode, StatusSnapshot,
};

impl From<StatusDto> for StatusSnapshot {
    fn from(dto: StatusDto) -> Self {
        Self {
            total_clients: dto.total_clients,
            network_stats: NetworkStats {
                sent: dto.network_stats.sent,
                recv: dto.network_stats.recv,
            },
            total_bandwidth: dto.total_bandwidth,
        }
    }
}

impl From<ClientDto> for ClientRecord {
    fn from(dto: ClientDto) -> Self {
        Self {
            ip: dto.ip,
            friendly_name: dto.friendly_name,
            icon: dto.icon,
            priority: dto.priority,
            usage: dto.usage,
            allocated: dto.allocated,
            usage_percent: dto.usage_percent,
        }
    }
}

impl From<HistoryDto> for HistorySeries {
    fn from(dto: HistoryDto) -> Self {
        // Goes through the constructor so ragged arrays get truncated.
        Self::new(dto.time, dto.upload, dto.download)
    }
}

impl From<RouterInfoDto> for RouterInfo {
    fn from(dto: RouterInfoDto) -> Self {
        Self {
            ip: dto.ip,
            kind: dto.kind.unwrap_or_else(|| "unknown".to_string()),
            mode: dto
                .mode
                .as_deref()
                .map_or_else(RouterMode::default, RouterMode::parse),
            status: dto.status.unwrap_or_else(|| "unknown".to_string()),
            admin: dto.admin,
        }
    }
}
