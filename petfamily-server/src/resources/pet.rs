//! Pets and their lookup tables: porte, especie, raca

use crate::models::{Consistency, Dependent, Field, FieldKind, Filter, FilterOp, Noun, ResourceSpec};

use super::user::USER;

pub static SIZE: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Porte",
        plural: "Portes",
        feminine: false,
    },
    path: "/porte",
    table: "porte",
    key: "id_porte",
    id_alias: "idPorte",
    fields: &[Field::new("descricao", "descricao", FieldKind::Text { min: 1, max: 50 }).required()],
    required_message: "Descrição do porte é obrigatória",
    select: r#"SELECT p.id_porte AS "idPorte", p.descricao AS "descricao" FROM porte p"#,
    order_by: &["descricao"],
    filters: &[],
    conflicts: &[],
    conflict_message: "Já existe um porte com esta descrição",
    dependents: &[Dependent {
        table: "pet",
        column: "id_porte",
    }],
    in_use_message: "Não é possível remover o porte pois está sendo utilizado em pets",
    checks: &[],
};

pub static SPECIES: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Espécie",
        plural: "Espécies",
        feminine: true,
    },
    path: "/especie",
    table: "especie",
    key: "id_especie",
    id_alias: "idEspecie",
    fields: &[Field::new("descricao", "descricao", FieldKind::Text { min: 1, max: 50 }).required()],
    required_message: "Descrição da espécie é obrigatória",
    select: r#"SELECT sp.id_especie AS "idEspecie", sp.descricao AS "descricao" FROM especie sp"#,
    order_by: &["descricao"],
    filters: &[],
    conflicts: &[],
    conflict_message: "Já existe uma espécie com esta descrição",
    dependents: &[
        Dependent {
            table: "raca",
            column: "id_especie",
        },
        Dependent {
            table: "pet",
            column: "id_especie",
        },
    ],
    in_use_message: "Não é possível remover a espécie pois está sendo utilizada em raças ou pets",
    checks: &[],
};

/// Breeds of one species
pub const BREEDS_OF_SPECIES: Filter = Filter {
    param: "especieId",
    alias: "idEspecie",
    op: FilterOp::Id,
};

pub static BREED: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Raça",
        plural: "Raças",
        feminine: true,
    },
    path: "/raca",
    table: "raca",
    key: "id_raca",
    id_alias: "idRaca",
    fields: &[
        Field::new("descricao", "descricao", FieldKind::Text { min: 1, max: 50 }).required(),
        Field::new("idEspecie", "id_especie", FieldKind::Id)
            .required()
            .references(&SPECIES),
    ],
    required_message: "Descrição e ID da espécie são obrigatórios",
    select: r#"SELECT ra.id_raca AS "idRaca", ra.descricao AS "descricao",
            ra.id_especie AS "idEspecie", sp.descricao AS "descricaoEspecie"
        FROM raca ra
        JOIN especie sp ON sp.id_especie = ra.id_especie"#,
    order_by: &["descricao"],
    filters: &[BREEDS_OF_SPECIES],
    conflicts: &[],
    conflict_message: "Já existe uma raça com esta descrição para a espécie",
    dependents: &[Dependent {
        table: "pet",
        column: "id_raca",
    }],
    in_use_message: "Não é possível remover a raça pois está sendo utilizada em pets",
    checks: &[Consistency::KeepsDependents {
        field: "idEspecie",
        mismatch: "SELECT 1 FROM pet WHERE id_raca = $1 AND id_especie <> $2",
        message: "A raça está vinculada a pets de outra espécie",
    }],
};

pub static PET: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Pet",
        plural: "Pets",
        feminine: false,
    },
    path: "/pet",
    table: "pet",
    key: "id_pet",
    id_alias: "idPet",
    fields: &[
        Field::new("idUsuario", "id_usuario", FieldKind::Id).references(&USER),
        Field::new("idPorte", "id_porte", FieldKind::Id).references(&SIZE),
        Field::new("idEspecie", "id_especie", FieldKind::Id).references(&SPECIES),
        Field::new("idRaca", "id_raca", FieldKind::Id).references(&BREED),
        Field::new("nome", "nome", FieldKind::Text { min: 1, max: 100 }),
        Field::new("sexo", "sexo", FieldKind::Choice(&["M", "F"]))
            .required()
            .hint("Sexo deve ser M ou F"),
        Field::new("nascimento", "nascimento", FieldKind::Date { allow_future: false }).required(),
    ],
    required_message: "Sexo e nascimento são campos obrigatórios",
    select: r#"SELECT p.id_pet AS "idPet", p.nome AS "nome", p.sexo AS "sexo",
            p.nascimento AS "nascimento", p.id_usuario AS "idUsuario",
            p.id_porte AS "idPorte", p.id_especie AS "idEspecie", p.id_raca AS "idRaca",
            u.nome AS "nomeUsuario", po.descricao AS "descricaoPorte",
            sp.descricao AS "descricaoEspecie", ra.descricao AS "descricaoRaca",
            c.id_cidade AS "idCidade", c.nome AS "cidade"
        FROM pet p
        LEFT JOIN usuario u ON u.id_usuario = p.id_usuario
        LEFT JOIN porte po ON po.id_porte = p.id_porte
        LEFT JOIN especie sp ON sp.id_especie = p.id_especie
        LEFT JOIN raca ra ON ra.id_raca = p.id_raca
        LEFT JOIN endereco en ON en.id_endereco = u.id_endereco
        LEFT JOIN logradouro l ON l.id_logradouro = en.id_logradouro
        LEFT JOIN bairro b ON b.id_bairro = l.id_bairro
        LEFT JOIN cidade c ON c.id_cidade = b.id_cidade"#,
    order_by: &["idPet"],
    filters: &[
        Filter {
            param: "idUsuario",
            alias: "idUsuario",
            op: FilterOp::Id,
        },
        Filter {
            param: "idEspecie",
            alias: "idEspecie",
            op: FilterOp::Id,
        },
        Filter {
            param: "idCidade",
            alias: "idCidade",
            op: FilterOp::Id,
        },
    ],
    conflicts: &[],
    conflict_message: "Pet já cadastrado",
    dependents: &[],
    in_use_message: "",
    checks: &[Consistency::BelongsTo {
        child: "idRaca",
        table: "raca",
        key: "id_raca",
        column: "id_especie",
        parent: "idEspecie",
        message: "A raça informada não pertence à espécie",
    }],
};
