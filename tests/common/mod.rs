//! Shared fixtures for integration tests.

#![allow(dead_code)]

use indoc::indoc;

/// A small report: two packages, one file appearing in both, one empty package.
pub const REPORT_JSON: &str = indoc! {r#"
    {
      "metadata": {
        "name": "ledger",
        "description": "Double-entry bookkeeping",
        "version": "1.2.0",
        "organization": "Acme",
        "developers": ["ann", "bo"]
      },
      "rollup": {
        "totalCount": 3,
        "coreStats": {
          "totalLoc": 420,
          "totalFunctions": 5,
          "totalPublicFunctions": 3,
          "totalPrivateFunctions": 2,
          "totalFileSizeBytes": 20480
        },
        "avgCyclomaticComplexity": 6.4,
        "maxCyclomaticComplexity": 25
      },
      "packageStats": [
        {
          "metadata": { "name": "com.acme.core" },
          "rollup": { "totalCount": 2, "coreStats": { "totalLoc": 300 } },
          "fileStats": [
            {
              "metadata": {
                "fileName": "Ledger.scala",
                "filePath": "core/src/Ledger.scala",
                "linesOfCode": 200,
                "fileSizeBytes": 9000
              },
              "memberStats": [
                {
                  "metadata": {
                    "signature": "entries: List[Entry]",
                    "declarationType": "val",
                    "accessModifier": "private",
                    "linesOfCode": 1
                  },
                  "hasScaladoc": false
                }
              ],
              "methodStats": [
                {
                  "metadata": {
                    "signature": "post(entry: Entry): Unit",
                    "accessModifier": "public",
                    "linesOfCode": 40
                  },
                  "hasScaladoc": "false",
                  "complexity": 25,
                  "nestingDepth": 5,
                  "parameterStats": { "totalParams": 1, "paramLists": 1 }
                },
                {
                  "metadata": {
                    "signature": "balance(): BigDecimal",
                    "accessModifier": "public",
                    "linesOfCode": 6
                  },
                  "hasScaladoc": true,
                  "complexity": 2
                }
              ]
            },
            {
              "metadata": {
                "fileName": "Entry.scala",
                "filePath": "core/src/Entry.scala",
                "linesOfCode": 100,
                "fileSizeBytes": 4000
              },
              "methodStats": [
                {
                  "metadata": { "signature": "amount: BigDecimal", "linesOfCode": 1 },
                  "complexity": null
                }
              ]
            }
          ]
        },
        {
          "metadata": { "name": "com.acme.api" },
          "fileStats": [
            {
              "metadata": {
                "fileName": "Ledger.scala",
                "filePath": "api/src/Ledger.scala",
                "linesOfCode": 120,
                "fileSizeBytes": 7480
              },
              "methodStats": [
                {
                  "metadata": { "signature": "route(): Route", "linesOfCode": 12 },
                  "complexity": 9
                },
                {
                  "metadata": { "signature": "health(): Route", "linesOfCode": 3 },
                  "complexity": 1
                }
              ]
            }
          ]
        },
        {
          "metadata": { "name": "com.acme.empty" }
        }
      ]
    }
"#};

/// `REPORT_JSON` encoded the way a report page embeds it.
pub fn report_payload() -> String {
    metrics_viewer::loader::pack_json(REPORT_JSON).unwrap()
}
