use crate::models::{Consistency, Dependent, Field, FieldKind, Filter, FilterOp, Noun, ResourceSpec};

use super::address::ADDRESS;

pub static LODGING: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Hospedagem",
        plural: "Hospedagens",
        feminine: true,
    },
    path: "/hospedagens",
    table: "hospedagem",
    key: "id_hospedagem",
    id_alias: "idHospedagem",
    fields: &[
        Field::new("nome", "nome", FieldKind::Text { min: 1, max: 150 }).required(),
        Field::new("idEndereco", "id_endereco", FieldKind::Id)
            .required()
            .references(&ADDRESS),
    ],
    required_message: "Nome e ID do endereço são campos obrigatórios",
    select: r#"SELECT h.id_hospedagem AS "idHospedagem", h.nome AS "nome",
            h.id_endereco AS "idEndereco", en.numero AS "numero",
            en.complemento AS "complemento", cp.codigo AS "cep",
            l.nome AS "logradouro", b.nome AS "bairro", c.nome AS "cidade",
            e.nome AS "estado", e.sigla AS "sigla"
        FROM hospedagem h
        JOIN endereco en ON en.id_endereco = h.id_endereco
        JOIN cep cp ON cp.id_cep = en.id_cep
        JOIN logradouro l ON l.id_logradouro = en.id_logradouro
        JOIN bairro b ON b.id_bairro = l.id_bairro
        JOIN cidade c ON c.id_cidade = b.id_cidade
        JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["nome"],
    filters: &[Filter {
        param: "enderecoId",
        alias: "idEndereco",
        op: FilterOp::Id,
    }],
    conflicts: &[],
    conflict_message: "Já existe uma hospedagem com este nome no mesmo endereço",
    dependents: &[
        Dependent {
            table: "servico",
            column: "id_hospedagem",
        },
        Dependent {
            table: "contrato",
            column: "id_hospedagem",
        },
    ],
    in_use_message:
        "Não é possível excluir a hospedagem pois existem serviços ou contratos vinculados a ela",
    checks: &[],
};

/// Services of one lodging
pub const SERVICES_OF_LODGING: Filter = Filter {
    param: "hospedagemId",
    alias: "idHospedagem",
    op: FilterOp::Id,
};

/// Services hang off a lodging; they are created and listed under
/// `/hospedagens/{id}/servicos` and addressed directly at `/servicos/{id}`.
pub static SERVICE: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Serviço",
        plural: "Serviços",
        feminine: false,
    },
    path: "/servicos",
    table: "servico",
    key: "id_servico",
    id_alias: "idServico",
    fields: &[
        Field::new("idHospedagem", "id_hospedagem", FieldKind::Id)
            .required()
            .references(&LODGING),
        Field::new("descricao", "descricao", FieldKind::Text { min: 1, max: 150 }).required(),
        Field::new("preco", "preco", FieldKind::Money)
            .required()
            .hint("Preço deve ser um número positivo"),
    ],
    required_message: "descricao e preco são obrigatórios",
    select: r#"SELECT s.id_servico AS "idServico", s.id_hospedagem AS "idHospedagem",
            s.descricao AS "descricao", s.preco AS "preco", h.nome AS "hospedagem"
        FROM servico s
        JOIN hospedagem h ON h.id_hospedagem = s.id_hospedagem"#,
    order_by: &["descricao"],
    filters: &[SERVICES_OF_LODGING],
    conflicts: &[],
    conflict_message: "Já existe um serviço com esta descrição nesta hospedagem",
    dependents: &[Dependent {
        table: "contrato_servico",
        column: "id_servico",
    }],
    in_use_message: "Não é possível remover o serviço pois está vinculado a contratos",
    checks: &[Consistency::KeepsDependents {
        field: "idHospedagem",
        mismatch: "SELECT 1 FROM contrato_servico cs \
            JOIN contrato c ON c.id_contrato = cs.id_contrato \
            WHERE cs.id_servico = $1 AND c.id_hospedagem <> $2",
        message: "O serviço está vinculado a contratos de outra hospedagem",
    }],
};
