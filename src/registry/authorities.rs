//! Built-in ePathway authorities.

use crate::config::{AuthorityConfig, ListMode};

const INCOMPLETE_SSL_CHAIN: &str = "Has an incomplete SSL chain";

fn authority(
    identifier: &str,
    base_url: &str,
    jurisdiction: &str,
    list_mode: ListMode,
) -> AuthorityConfig {
    AuthorityConfig::new(identifier, base_url, jurisdiction).with_list_mode(list_mode)
}

pub(super) fn builtin_authorities() -> Vec<AuthorityConfig> {
    use ListMode::*;

    vec![
        authority(
            "adelaide",
            "https://epathway.adelaidecitycouncil.com/epathway/ePathwayProd",
            "SA",
            AllThisYear,
        ),
        authority(
            "ballarat",
            "https://eservices.ballarat.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "barossa",
            "https://epayments.barossa.sa.gov.au/ePathway/Production",
            "SA",
            Last30Days,
        )
        .with_force_detail(true),
        authority(
            "bendigo",
            "https://epathway.bendigo.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        )
        .with_note("Not using last_30_days because the bendigo server has a problem"),
        authority(
            "campbelltown",
            "https://ebiz.campbelltown.nsw.gov.au/ePathway/Production",
            "NSW",
            All,
        ),
        authority(
            "darebin",
            "https://eservices.darebin.vic.gov.au/ePathway/Production",
            "VIC",
            AllThisYear,
        ),
        authority(
            "east_gippsland",
            "https://epathway.egipps.vic.gov.au/ePathway/Production",
            "VIC",
            Last30Days,
        ),
        authority(
            "frankston",
            "https://epathway.frankston.vic.gov.au/ePathway/Production",
            "VIC",
            Last30Days,
        ),
        authority(
            "gladstone",
            "https://online.gladstone.qld.gov.au/ePathway/eProd",
            "QLD",
            Last30Days,
        ),
        authority(
            "glen_eira",
            "https://epathway-web.gleneira.vic.gov.au/ePathway/Production",
            "VIC",
            All,
        )
        .with_max_pages(4),
        authority(
            "gold_coast",
            "https://cogc.cloud.infor.com/ePathway/epthprod",
            "QLD",
            Last30Days,
        ),
        authority(
            "greater_shepparton",
            "https://eservices.greatershepparton.com.au/ePathway/Production",
            "VIC",
            Last30Days,
        )
        .with_disable_ssl_certificate_check(true)
        .with_note(INCOMPLETE_SSL_CHAIN),
        authority(
            "greatlakes",
            "https://services.greatlakes.nsw.gov.au/ePathway/Production",
            "NSW",
            All,
        )
        .with_max_pages(10)
        .with_disable_ssl_certificate_check(true),
        authority(
            "inverell",
            "http://203.49.140.77/ePathway/Production",
            "NSW",
            AllThisYear,
        ),
        authority(
            "kingston",
            "https://online.kingston.vic.gov.au/ePathway/Production",
            "VIC",
            AllThisYear,
        ),
        authority(
            "knox",
            "https://eservices.knox.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "lake_macquarie",
            "https://property.lakemac.com.au/ePathway/Production",
            "NSW",
            Last30Days,
        ),
        authority(
            "latrobe",
            "https://eservices.latrobe.vic.gov.au/ePathway/Production",
            "VIC",
            Last30Days,
        ),
        authority(
            "livingstone",
            "http://mpathway.livingstone.qld.gov.au/ePathway/Production",
            "QLD",
            Last30Days,
        ),
        authority(
            "macedon_ranges",
            "https://eservices.mrsc.vic.gov.au/ePathway/Production",
            "VIC",
            Last30Days,
        ),
        authority(
            "maroondah",
            "https://eservices.maroondah.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "monash",
            "https://epathway.monash.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "mooney_valley",
            "https://online.mvcc.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "moreland",
            "https://eservices.moreland.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "nillumbik",
            "https://epathway.nillumbik.vic.gov.au/ePathway/Production",
            "VIC",
            Advertising,
        ),
        authority(
            "onkaparinga",
            "http://pathway.onkaparinga.sa.gov.au/ePathway/Production",
            "SA",
            AllThisYear,
        ),
        authority(
            "parramatta",
            "https://onlineservices.parracity.nsw.gov.au/ePathway/Prod",
            "NSW",
            AllSince2020,
        ),
        authority(
            "port_phillip",
            "https://eservices.portphillip.vic.gov.au/ePathway/Production",
            "VIC",
            Last30Days,
        ),
        authority(
            "rockhampton",
            "https://eservices.rockhamptonregion.qld.gov.au/ePathway/ePathProd",
            "QLD",
            Last30Days,
        ),
        authority(
            "salisbury",
            "https://eservices.salisbury.sa.gov.au/ePathway/Production",
            "SA",
            Last30Days,
        ),
        authority(
            "south_gippsland",
            "https://eservices.southgippsland.vic.gov.au/ePathway/ePathProd",
            "VIC",
            Advertising,
        ),
        authority(
            "the_hills",
            "https://epathway.thehills.nsw.gov.au/ePathway/Production",
            "NSW",
            Last30Days,
        ),
        authority(
            "unley",
            "https://online.unley.sa.gov.au/ePathway/Production",
            "SA",
            Last30Days,
        ),
        authority(
            "west_torrens",
            "https://epathway.wtcc.sa.gov.au/ePathway/Production",
            "SA",
            Last30Days,
        )
        .with_disable_ssl_certificate_check(true)
        .with_note(INCOMPLETE_SSL_CHAIN),
        authority(
            "whitehorse",
            "https://eservices.whitehorse.vic.gov.au/ePathway/Production",
            "VIC",
            Last30Days,
        ),
        authority(
            "wollongong",
            "http://epathway.wollongong.nsw.gov.au/ePathway/Production",
            "NSW",
            Advertising,
        ),
        authority(
            "yarra_ranges",
            "https://epathway.yarraranges.vic.gov.au/ePathway/Production",
            "VIC",
            All,
        )
        .with_max_pages(20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_authority() {
        assert_eq!(builtin_authorities().len(), 37);
    }

    #[test]
    fn certificate_checks_are_only_skipped_where_noted() {
        let skipped: Vec<String> = builtin_authorities()
            .into_iter()
            .filter(|entry| entry.disable_ssl_certificate_check == Some(true))
            .map(|entry| entry.identifier)
            .collect();
        assert_eq!(skipped, ["greater_shepparton", "greatlakes", "west_torrens"]);
    }
}
